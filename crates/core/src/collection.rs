//! Ordered passage collections and their joined rendering.
//!
//! A [`PassageCollection`] is an ordered sequence of passages; duplicates
//! and unsorted order are both permitted, and nothing is merged or
//! deduplicated implicitly. Rendering partitions the sequence into
//! maximal runs of consecutive same-book passages, folds each run into
//! citation fragments, and joins the fragments with `"; "`.

use std::fmt;

use crate::bunch::Bunch;
use crate::passage::Passage;

/// An ordered sequence of passages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassageCollection<'v> {
    passages: Vec<Passage<'v>>,
}

impl<'v> PassageCollection<'v> {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection over the given passages, in the given order.
    pub fn from_passages(passages: Vec<Passage<'v>>) -> Self {
        PassageCollection { passages }
    }

    /// Append a single passage at the end.
    pub fn append(&mut self, passage: Passage<'v>) {
        self.passages.push(passage);
    }

    /// Append every passage of `other`, preserving order.
    pub fn extend_from(&mut self, other: PassageCollection<'v>) {
        self.passages.extend(other.passages);
    }

    /// The passages in collection order.
    pub fn passages(&self) -> &[Passage<'v>] {
        &self.passages
    }

    /// Consume the collection, yielding its passages.
    pub fn into_passages(self) -> Vec<Passage<'v>> {
        self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Sort passages by their canonical start key. The sort is stable,
    /// so passages with equal start bounds keep their insertion order (no
    /// total order beyond the start key is defined).
    pub fn sort(&mut self) {
        self.passages.sort_by_key(|p| p.start());
    }

    /// Render the collection as one citation string.
    ///
    /// An empty collection renders as the empty string and a single
    /// member as that member's own rendering. Otherwise invalid members
    /// are dropped, the remainder is partitioned into maximal runs of
    /// consecutive same-book passages -- without re-sorting, so a book
    /// appearing twice non-contiguously yields two separate fragments --
    /// and the per-run fragments are joined with `"; "`.
    pub fn reference_string(&self, abbreviated: bool, dash: &str) -> String {
        if self.passages.is_empty() {
            return String::new();
        }
        if self.passages.len() == 1 {
            return self.passages[0].reference_string(abbreviated, dash);
        }
        let valid: Vec<&Passage<'v>> = self.passages.iter().filter(|p| p.is_valid()).collect();
        if valid.is_empty() {
            return String::new();
        }

        let mut group_strings = Vec::new();
        for group in same_book_runs(&valid) {
            let first = group[0];
            if first.in_single_chapter_book() {
                // Verse fragments only; the chapter number never appears.
                let parts: Vec<String> = group
                    .iter()
                    .map(|p| {
                        if p.start_verse() == p.end_verse() {
                            p.start_verse().to_string()
                        } else {
                            format!("{}{}{}", p.start_verse(), dash, p.end_verse())
                        }
                    })
                    .collect();
                group_strings.push(format!(
                    "{} {}",
                    first.book_name(abbreviated),
                    parts.join(", ")
                ));
            } else if group.len() == 1 && first.is_complete_book() {
                group_strings.push(first.book_name(abbreviated).to_owned());
            } else {
                let mut bunch = Bunch::new();
                for p in group {
                    bunch.add(**p);
                }
                group_strings.push(bunch.render(abbreviated, dash));
            }
        }
        group_strings.join("; ")
    }

    /// Abbreviated rendering with the default dash.
    pub fn abbr(&self) -> String {
        self.reference_string(true, "-")
    }
}

/// Partition into maximal runs of consecutive elements sharing one book.
fn same_book_runs<'a, 'v>(passages: &'a [&'a Passage<'v>]) -> Vec<&'a [&'a Passage<'v>]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=passages.len() {
        if i == passages.len() || passages[i].book() != passages[start].book() {
            runs.push(&passages[start..i]);
            start = i;
        }
    }
    runs
}

impl fmt::Display for PassageCollection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_string(false, "-"))
    }
}

impl<'v> std::ops::Add<Passage<'v>> for PassageCollection<'v> {
    type Output = PassageCollection<'v>;

    fn add(mut self, other: Passage<'v>) -> PassageCollection<'v> {
        self.passages.push(other);
        self
    }
}

impl<'v> std::ops::Add for PassageCollection<'v> {
    type Output = PassageCollection<'v>;

    fn add(mut self, other: PassageCollection<'v>) -> PassageCollection<'v> {
        self.passages.extend(other.passages);
        self
    }
}

impl<'v> FromIterator<Passage<'v>> for PassageCollection<'v> {
    fn from_iter<I: IntoIterator<Item = Passage<'v>>>(iter: I) -> Self {
        PassageCollection {
            passages: iter.into_iter().collect(),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
