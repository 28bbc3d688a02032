//! Passage normalization, validation, and rendering.
//!
//! A [`Passage`] is one contiguous span of verses within one book,
//! normalized against a [`Versification`] at construction time. Partially
//! specified references are filled in where they can safely be assumed
//! (a bare book means the whole book, a bare chapter the whole chapter,
//! and so on), overshooting end bounds are clamped to the book's actual
//! extent, and bounds landing on verses the translation skips are
//! repaired inward. Infeasible references fail with
//! [`InvalidReference`]; a constructed passage is immutable and always
//! structurally valid.

use std::fmt;

use crate::collection::PassageCollection;
use crate::error::InvalidReference;
use crate::record::PassageRecord;
use crate::versification::{BookRef, Versification, CANON_BOOKS, PSALMS};

/// Rendering placeholder for passages that fail the structural re-check.
const INVALID_PLACEHOLDER: &str = "Invalid passage";

/// Canonical numeric key for one bound: `book * 10^6 + chapter * 10^3 +
/// verse`, nine decimal digits `BBCCCVVV`. Chapter and verse must each
/// stay below 1000; every shipped versification is far under that
/// ceiling, and the encoding is only computed for validated bounds.
fn encode(book: u8, chapter: u16, verse: u16) -> u32 {
    debug_assert!(chapter < 1000 && verse < 1000);
    u32::from(book) * 1_000_000 + u32::from(chapter) * 1_000 + u32::from(verse)
}

// ──────────────────────────────────────────────
// Passage
// ──────────────────────────────────────────────

/// A validated contiguous verse span within one book.
///
/// Holds a shared reference to its versification provider, which must
/// outlive the passage; everything else is a handful of integers, so the
/// type is `Copy`. Equality is structural over book and the four bounds
/// (the provider is excluded); ordering is by the canonical [`start`]
/// key only, via [`PassageCollection::sort`].
///
/// [`start`]: Passage::start
#[derive(Clone, Copy)]
pub struct Passage<'v> {
    bd: &'v dyn Versification,
    book: u8,
    start_chapter: u16,
    start_verse: u16,
    end_chapter: u16,
    end_verse: u16,
    start: u32,
    end: u32,
}

impl<'v> Passage<'v> {
    /// Construct and normalize a passage reference.
    ///
    /// Missing information is filled in where it can safely be assumed:
    /// no numbers at all means the whole book; for multi-chapter books a
    /// missing start chapter or verse defaults to 1, a missing end
    /// chapter to the start chapter, and a missing end verse to the start
    /// verse (when the start verse was explicit and the span stays in one
    /// chapter) or the end chapter's last verse. Single-chapter books
    /// collapse the chapter/verse ambiguity by dedicated rules so that
    /// callers who do not know the book is single-chapter still get the
    /// verse range they meant. End bounds overshooting the book are
    /// clamped; start or end bounds landing on missing verses are moved
    /// inward. Any reference that cannot be reconciled fails with
    /// [`InvalidReference`].
    pub fn new<'b>(
        book: impl Into<BookRef<'b>>,
        start_chapter: Option<u16>,
        start_verse: Option<u16>,
        end_chapter: Option<u16>,
        end_verse: Option<u16>,
        bd: &'v dyn Versification,
    ) -> Result<Self, InvalidReference> {
        let book = book.into().resolve(bd)?;

        if [start_chapter, start_verse, end_chapter, end_verse]
            .iter()
            .any(|n| *n == Some(0))
        {
            return Err(InvalidReference::NonPositive);
        }

        // A provider that has no data for the book reports zero
        // chapters; reject before any defaulting reads its tables.
        let chapter_count = bd.chapter_count(book);
        if chapter_count == 0 {
            return Err(InvalidReference::ChapterOutOfRange { book, chapter: 1 });
        }

        // No chapter/verse information at all: the whole book.
        if start_chapter.is_none()
            && start_verse.is_none()
            && end_chapter.is_none()
            && end_verse.is_none()
        {
            let e_v = bd.last_verse(book, chapter_count);
            return Ok(Self::assemble(bd, book, 1, 1, chapter_count, e_v));
        }
        let (s_ch, s_v, mut e_ch, mut e_v) = if chapter_count == 1 {
            Self::collapse_single_chapter(start_chapter, start_verse, end_chapter, end_verse)?
        } else {
            Self::default_multi_chapter(
                bd,
                book,
                start_chapter,
                start_verse,
                end_chapter,
                end_verse,
            )
        };

        // Clamp the end bound to the book's actual extent.
        if e_ch > chapter_count {
            e_ch = chapter_count;
            e_v = bd.last_verse(book, e_ch);
        } else if e_v > bd.last_verse(book, e_ch) {
            e_v = bd.last_verse(book, e_ch);
        }

        // The start bound is never clamped; out-of-range starts fail.
        if s_ch > chapter_count {
            return Err(InvalidReference::ChapterOutOfRange {
                book,
                chapter: s_ch,
            });
        }
        if s_v > bd.last_verse(book, s_ch) {
            return Err(InvalidReference::VerseOutOfRange {
                book,
                chapter: s_ch,
                verse: s_v,
            });
        }
        if s_ch > e_ch || (s_ch == e_ch && s_v > e_v) {
            return Err(InvalidReference::StartAfterEnd);
        }
        if chapter_count == 1 && (s_ch > 1 || e_ch > 1) {
            return Err(InvalidReference::ChapterOutOfRange {
                book,
                chapter: s_ch.max(e_ch),
            });
        }

        let (s_v, e_ch, e_v) = Self::repair_missing(bd, book, s_ch, s_v, e_ch, e_v)?;
        Ok(Self::assemble(bd, book, s_ch, s_v, e_ch, e_v))
    }

    /// The entire book: `Passage::whole_book("Genesis", bd)`.
    pub fn whole_book<'b>(
        book: impl Into<BookRef<'b>>,
        bd: &'v dyn Versification,
    ) -> Result<Self, InvalidReference> {
        Self::new(book, None, None, None, None, bd)
    }

    /// A whole chapter -- or, for a single-chapter book, the single verse
    /// with that number: `Passage::chapter("Phm", 2, bd)`.
    pub fn chapter<'b>(
        book: impl Into<BookRef<'b>>,
        chapter: u16,
        bd: &'v dyn Versification,
    ) -> Result<Self, InvalidReference> {
        Self::new(book, Some(chapter), None, None, None, bd)
    }

    /// A single verse: `Passage::verse("John", 3, 16, bd)`.
    pub fn verse<'b>(
        book: impl Into<BookRef<'b>>,
        chapter: u16,
        verse: u16,
        bd: &'v dyn Versification,
    ) -> Result<Self, InvalidReference> {
        Self::new(book, Some(chapter), Some(verse), None, None, bd)
    }

    /// A fully specified range: `Passage::range("Rom", 3, 21, 3, 26, bd)`.
    pub fn range<'b>(
        book: impl Into<BookRef<'b>>,
        start_chapter: u16,
        start_verse: u16,
        end_chapter: u16,
        end_verse: u16,
        bd: &'v dyn Versification,
    ) -> Result<Self, InvalidReference> {
        Self::new(
            book,
            Some(start_chapter),
            Some(start_verse),
            Some(end_chapter),
            Some(end_verse),
            bd,
        )
    }

    /// Single-chapter books collapse chapter/verse ambiguity: a caller
    /// who writes "chapter 2" of Philemon means verse 2, and a chapter
    /// range from a caller who does not know the book is single-chapter
    /// is reinterpreted as a verse range. Returns `(s_ch, s_v, e_ch,
    /// e_v)` with chapters forced to 1.
    fn collapse_single_chapter(
        start_chapter: Option<u16>,
        start_verse: Option<u16>,
        end_chapter: Option<u16>,
        end_verse: Option<u16>,
    ) -> Result<(u16, u16, u16, u16), InvalidReference> {
        let (mut s_ch, mut s_v) = (start_chapter, start_verse);

        // No start information at all: start from the first verse.
        if s_ch.is_none() && s_v.is_none() {
            s_ch = Some(1);
            s_v = Some(1);
        }

        let chapters_unit =
            s_ch.map_or(true, |c| c == 1) && end_chapter.map_or(true, |c| c == 1);
        match (s_ch, s_v, end_chapter, end_verse) {
            // Both verses present (possibly via the default above); any
            // given chapter values must be 1.
            (_, Some(sv), _, Some(ev)) if chapters_unit => Ok((1, sv, 1, ev)),
            // Chapter range given where a verse range was meant (useful
            // for callers that do not know the book is single-chapter).
            (Some(sc), None, Some(ec), None) => Ok((1, sc, 1, ec)),
            // Only start info: a bare number is a verse number; a
            // chapter/verse pair denotes the verse range it brackets.
            (Some(sc), sv, None, None) => Ok((1, sc, 1, sv.unwrap_or(sc))),
            // Only a start verse: a single-verse reference.
            (None, Some(sv), None, None) => Ok((1, sv, 1, sv)),
            _ => Err(InvalidReference::AmbiguousSingleChapter),
        }
    }

    /// Multi-chapter defaulting: missing fields default by context.
    fn default_multi_chapter(
        bd: &dyn Versification,
        book: u8,
        start_chapter: Option<u16>,
        start_verse: Option<u16>,
        end_chapter: Option<u16>,
        end_verse: Option<u16>,
    ) -> (u16, u16, u16, u16) {
        let s_ch = start_chapter.unwrap_or(1);
        let s_v = start_verse.unwrap_or(1);
        let mut e_ch = end_chapter.unwrap_or(s_ch);
        let e_v = match end_verse {
            Some(v) => v,
            None => {
                if s_ch == e_ch {
                    match start_verse {
                        Some(v) => v,
                        // A nonexistent chapter yields last_verse == 0;
                        // fall back to 1 and let validation reject it.
                        None => bd.last_verse(book, e_ch).max(1),
                    }
                } else {
                    if e_ch > bd.chapter_count(book) {
                        e_ch = bd.chapter_count(book);
                    }
                    bd.last_verse(book, e_ch)
                }
            }
        };
        (s_ch, s_v, e_ch, e_v)
    }

    /// Move bounds off missing verses: the start advances forward, the
    /// end retreats backward. When the whole span sits in one chapter the
    /// advancing start must not pass the end. Across chapters, an end
    /// retreating below verse 1 cascades to the previous chapter's last
    /// verse; the new chapter's own missing-verse set is not re-checked,
    /// which datasets make unreachable by never listing a chapter's last
    /// verse adjacent to another missing verse.
    fn repair_missing(
        bd: &dyn Versification,
        book: u8,
        s_ch: u16,
        mut s_v: u16,
        mut e_ch: u16,
        mut e_v: u16,
    ) -> Result<(u16, u16, u16), InvalidReference> {
        if s_ch == e_ch {
            let missing = bd.missing_verses(book, s_ch);
            while missing.contains(&s_v) {
                if s_v < e_v {
                    s_v += 1;
                } else {
                    return Err(InvalidReference::EmptyAfterRepair);
                }
            }
            while missing.contains(&e_v) {
                e_v -= 1;
            }
        } else {
            let missing_start = bd.missing_verses(book, s_ch);
            while missing_start.contains(&s_v) {
                s_v += 1;
            }
            let missing_end = bd.missing_verses(book, e_ch);
            while missing_end.contains(&e_v) {
                e_v -= 1;
            }
            if e_v < 1 {
                e_ch -= 1;
                e_v = bd.last_verse(book, e_ch);
            }
        }
        Ok((s_v, e_ch, e_v))
    }

    fn assemble(
        bd: &'v dyn Versification,
        book: u8,
        start_chapter: u16,
        start_verse: u16,
        end_chapter: u16,
        end_verse: u16,
    ) -> Self {
        Passage {
            bd,
            book,
            start_chapter,
            start_verse,
            end_chapter,
            end_verse,
            start: encode(book, start_chapter, start_verse),
            end: encode(book, end_chapter, end_verse),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Numeric book id, 1-66.
    pub fn book(&self) -> u8 {
        self.book
    }

    pub fn start_chapter(&self) -> u16 {
        self.start_chapter
    }

    pub fn start_verse(&self) -> u16 {
        self.start_verse
    }

    pub fn end_chapter(&self) -> u16 {
        self.end_chapter
    }

    pub fn end_verse(&self) -> u16 {
        self.end_verse
    }

    /// Canonical numeric key of the start bound (`BBCCCVVV`, nine decimal
    /// digits). This is the passage ordering key and, with [`end`], the
    /// intended shape for storage-layer range queries.
    ///
    /// [`end`]: Passage::end
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Canonical numeric key of the end bound.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// The versification provider this passage was normalized against.
    pub fn versification(&self) -> &'v dyn Versification {
        self.bd
    }

    /// Whether this passage's book has exactly one chapter.
    pub fn in_single_chapter_book(&self) -> bool {
        self.bd.chapter_count(self.book) == 1
    }

    /// Plain-data snapshot of this passage for serialization and
    /// storage-layer range queries.
    pub fn record(&self) -> PassageRecord {
        PassageRecord::from(self)
    }

    // ── Structural predicates ────────────────────────────────────────

    /// Re-check every structural invariant against the provider. Pure;
    /// passages built through [`Passage::new`] always satisfy it.
    pub fn is_valid(&self) -> bool {
        if self.book < 1 || self.book > CANON_BOOKS {
            return false;
        }
        if self.start_chapter > self.end_chapter {
            return false;
        }
        if self.start_chapter == self.end_chapter && self.end_verse < self.start_verse {
            return false;
        }
        if self.bd.chapter_count(self.book) < self.end_chapter {
            return false;
        }
        if self.bd.last_verse(self.book, self.end_chapter) < self.end_verse {
            return false;
        }
        if self.bd.last_verse(self.book, self.start_chapter) < self.start_verse {
            return false;
        }
        if self
            .bd
            .missing_verses(self.book, self.start_chapter)
            .contains(&self.start_verse)
        {
            return false;
        }
        if self
            .bd
            .missing_verses(self.book, self.end_chapter)
            .contains(&self.end_verse)
        {
            return false;
        }
        true
    }

    /// Whether the bounds cover the entire book.
    pub fn is_complete_book(&self) -> bool {
        self.start_chapter == 1
            && self.start_verse == 1
            && self.end_chapter == self.bd.chapter_count(self.book)
            && self.end_verse == self.bd.last_verse(self.book, self.end_chapter)
    }

    /// Whether the bounds cover exactly one whole chapter.
    pub fn is_complete_chapter(&self) -> bool {
        self.start_verse == 1
            && self.start_chapter == self.end_chapter
            && self.end_verse == self.bd.last_verse(self.book, self.end_chapter)
    }

    // ── Derived metrics ──────────────────────────────────────────────

    /// Number of verses in the span, skipping missing verses. 0 for an
    /// invalid passage.
    pub fn verse_count(&self) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        if self.start_chapter == self.end_chapter {
            let mut n = u32::from(self.end_verse - self.start_verse) + 1;
            for v in self.bd.missing_verses(self.book, self.start_chapter) {
                if *v >= self.start_verse && *v <= self.end_verse {
                    n -= 1;
                }
            }
            n
        } else {
            let start_last = self.bd.last_verse(self.book, self.start_chapter);
            let mut n = u32::from(self.end_verse) + u32::from(start_last - self.start_verse) + 1;
            for chapter in self.start_chapter + 1..self.end_chapter {
                n += u32::from(self.bd.last_verse(self.book, chapter))
                    - self.bd.missing_verses(self.book, chapter).len() as u32;
            }
            for v in self.bd.missing_verses(self.book, self.start_chapter) {
                if *v >= self.start_verse {
                    n -= 1;
                }
            }
            for v in self.bd.missing_verses(self.book, self.end_chapter) {
                if *v <= self.end_verse {
                    n -= 1;
                }
            }
            n
        }
    }

    /// Total number of verses in the whole book, skipping missing verses.
    pub fn book_total_verse_count(&self) -> u32 {
        let mut verses = 0u32;
        for chapter in 1..=self.bd.chapter_count(self.book) {
            verses += u32::from(self.bd.last_verse(self.book, chapter))
                - self.bd.missing_verses(self.book, chapter).len() as u32;
        }
        verses
    }

    /// Fraction of the book this span covers, in `[0, 1]`.
    pub fn proportion_of_book(&self) -> f64 {
        f64::from(self.verse_count()) / f64::from(self.book_total_verse_count())
    }

    // ── Truncation & extension ───────────────────────────────────────

    /// Shorten the passage to fit the given constraints, keeping the same
    /// start bound. The effective limit is the tightest of the current
    /// length, `max_verses`, and `floor(max_proportion *
    /// book_total_verse_count())`. Returns the passage unchanged if it
    /// already fits, or `None` when the limit drops below one verse.
    ///
    /// # Panics
    ///
    /// Panics if the verse walk runs off the end of the span without
    /// reaching the limit -- that means a counting invariant is broken
    /// elsewhere, not that the input was bad.
    pub fn truncate(&self, max_verses: Option<u32>, max_proportion: Option<f64>) -> Option<Self> {
        let current = self.verse_count();
        let mut limit = current;
        if let Some(n) = max_verses {
            limit = limit.min(n);
        }
        if let Some(p) = max_proportion {
            limit = limit.min((p * f64::from(self.book_total_verse_count())) as u32);
        }
        if current <= limit {
            return Some(*self);
        }
        if limit < 1 {
            return None;
        }

        // Walk the chapters, accumulating verses that exist in this
        // translation, and stop at the verse where the count hits the
        // limit.
        let mut n = 0u32;
        for chapter in self.start_chapter..=self.end_chapter {
            let first = if chapter == self.start_chapter {
                self.start_verse
            } else {
                1
            };
            let last = if chapter == self.end_chapter {
                self.end_verse
            } else {
                self.bd.last_verse(self.book, chapter)
            };
            let missing = self.bd.missing_verses(self.book, chapter);
            let valid: Vec<u16> = (first..=last).filter(|v| !missing.contains(v)).collect();
            if n + valid.len() as u32 >= limit {
                let end_verse = valid[(limit - n - 1) as usize];
                let truncated = Passage::new(
                    BookRef::Id(self.book),
                    Some(self.start_chapter),
                    Some(self.start_verse),
                    Some(chapter),
                    Some(end_verse),
                    self.bd,
                )
                .expect("bounds of a validated passage must reconstruct");
                return Some(truncated);
            }
            n += valid.len() as u32;
        }
        panic!("verse walk exhausted the span before reaching limit {limit}");
    }

    /// Lengthen the passage to meet the given constraints, keeping the
    /// same start bound. The desired length is the largest of the current
    /// length, `min_verses`, and `floor(min_proportion *
    /// book_total_verse_count())`, capped by the end of the book. Returns
    /// the passage unchanged if it is already long enough, or `None` when
    /// the start reference itself is out of range.
    pub fn extend(&self, min_verses: Option<u32>, min_proportion: Option<f64>) -> Option<Self> {
        if self.book < 1
            || self.book > CANON_BOOKS
            || self.start_chapter < 1
            || self.start_chapter > self.bd.chapter_count(self.book)
            || self.start_verse < 1
            || self.start_verse > self.bd.last_verse(self.book, self.start_chapter)
        {
            return None;
        }
        let current = self.verse_count();
        let mut limit = current;
        if let Some(n) = min_verses {
            limit = limit.max(n);
        }
        if let Some(p) = min_proportion {
            limit = limit.max((p * f64::from(self.book_total_verse_count())) as u32);
        }
        if current >= limit {
            return Some(*self);
        }

        // Extend by truncating the longest possible passage from the
        // same start.
        let end_chapter = self.bd.chapter_count(self.book);
        let end_verse = self.bd.last_verse(self.book, end_chapter);
        let maximal = Passage::new(
            BookRef::Id(self.book),
            Some(self.start_chapter),
            Some(self.start_verse),
            Some(end_chapter),
            Some(end_verse),
            self.bd,
        )
        .expect("range-checked start with the book's own end must construct");
        maximal.truncate(Some(limit), None)
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Full or abbreviated book name. The full name of Psalms renders in
    /// the singular when the span stays within one chapter ("Psalm 23",
    /// but "Psalms 20-25").
    pub fn book_name(&self, abbreviated: bool) -> &'v str {
        if abbreviated {
            self.bd.book_abbreviation(self.book)
        } else if self.book == PSALMS && self.start_chapter == self.end_chapter {
            "Psalm"
        } else {
            self.bd.book_name(self.book)
        }
    }

    /// Render the reference in its shortest unambiguous form: the bare
    /// book name for a whole book (or the whole chapter of a
    /// single-chapter book), `"Book N"` for a whole chapter, a bare verse
    /// number for one verse of a single-chapter book, and
    /// chapter-and-verse forms otherwise, with `dash` as the range
    /// separator. Invalid passages render as a fixed placeholder.
    pub fn reference_string(&self, abbreviated: bool, dash: &str) -> String {
        if !self.is_valid() {
            return INVALID_PLACEHOLDER.to_owned();
        }
        let name = self.book_name(abbreviated);
        if self.bd.chapter_count(self.book) == 1 {
            return if self.start_verse == self.end_verse {
                format!("{} {}", name, self.start_verse)
            } else if self.start_verse == 1 && self.end_verse == self.bd.last_verse(self.book, 1) {
                name.to_owned()
            } else {
                format!("{} {}{}{}", name, self.start_verse, dash, self.end_verse)
            };
        }
        if self.start_chapter == self.end_chapter {
            if self.start_verse == self.end_verse {
                format!("{} {}:{}", name, self.start_chapter, self.start_verse)
            } else if self.start_verse == 1
                && self.end_verse == self.bd.last_verse(self.book, self.start_chapter)
            {
                format!("{} {}", name, self.start_chapter)
            } else {
                format!(
                    "{} {}:{}{}{}",
                    name, self.start_chapter, self.start_verse, dash, self.end_verse
                )
            }
        } else if self.start_verse == 1
            && self.end_verse == self.bd.last_verse(self.book, self.end_chapter)
        {
            if self.start_chapter == 1 && self.end_chapter == self.bd.chapter_count(self.book) {
                name.to_owned()
            } else {
                format!("{} {}{}{}", name, self.start_chapter, dash, self.end_chapter)
            }
        } else {
            format!(
                "{} {}:{}{}{}:{}",
                name, self.start_chapter, self.start_verse, dash, self.end_chapter, self.end_verse
            )
        }
    }

    /// Abbreviated rendering with the default dash.
    pub fn abbr(&self) -> String {
        self.reference_string(true, "-")
    }
}

// ──────────────────────────────────────────────
// Trait impls
// ──────────────────────────────────────────────

impl fmt::Display for Passage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_string(false, "-"))
    }
}

impl fmt::Debug for Passage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passage")
            .field("book", &self.book)
            .field("start_chapter", &self.start_chapter)
            .field("start_verse", &self.start_verse)
            .field("end_chapter", &self.end_chapter)
            .field("end_verse", &self.end_verse)
            .finish()
    }
}

impl PartialEq for Passage<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.book == other.book
            && self.start_chapter == other.start_chapter
            && self.start_verse == other.start_verse
            && self.end_chapter == other.end_chapter
            && self.end_verse == other.end_verse
    }
}

impl Eq for Passage<'_> {}

impl<'v> std::ops::Add for Passage<'v> {
    type Output = PassageCollection<'v>;

    /// Combining two passages yields a collection holding both, left
    /// operand first. Adjacent spans are deliberately not coalesced.
    fn add(self, other: Passage<'v>) -> PassageCollection<'v> {
        PassageCollection::from_passages(vec![self, other])
    }
}

impl<'v> std::ops::Add<PassageCollection<'v>> for Passage<'v> {
    type Output = PassageCollection<'v>;

    fn add(self, other: PassageCollection<'v>) -> PassageCollection<'v> {
        let mut passages = vec![self];
        passages.extend(other.into_passages());
        PassageCollection::from_passages(passages)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
