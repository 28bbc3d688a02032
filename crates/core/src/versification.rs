//! Versification provider abstraction.
//!
//! A [`Versification`] describes one translation's canon structure: which
//! books exist, how many chapters each has, the last verse number of each
//! chapter, and which verse numbers the translation skips entirely.
//! [`Passage`](crate::Passage) construction and rendering are driven
//! solely by this read-only lookup service, so alternate versification
//! schemes plug in without touching the normalization engine.

use crate::error::InvalidReference;

/// Number of books in the closed canon. Book ids run 1..=[`CANON_BOOKS`].
pub const CANON_BOOKS: u8 = 66;

/// Book id of Psalms, whose full name renders in the singular ("Psalm")
/// when a reference spans exactly one chapter.
pub const PSALMS: u8 = 19;

// ──────────────────────────────────────────────
// Provider trait
// ──────────────────────────────────────────────

/// Read-only lookup service for one translation's canon structure.
///
/// All methods are total: out-of-range books or chapters yield 0, an
/// empty slice, or an empty string rather than panicking, and downstream
/// validation treats those values as "does not exist". Implementations
/// must never mutate after construction; a provider is shared and read
/// concurrently from any number of passages.
pub trait Versification: Sync {
    /// Resolve a full book name or standard abbreviation to its 1-66 id.
    /// Lookup is case-insensitive. `None` when the name is unknown.
    fn book_number(&self, name: &str) -> Option<u8>;

    /// Number of chapters in the book (>= 1), or 0 for an out-of-range id.
    fn chapter_count(&self, book: u8) -> u16;

    /// Last verse number of the chapter, or 0 when the book or chapter is
    /// out of range.
    fn last_verse(&self, book: u8, chapter: u16) -> u16;

    /// Verse numbers within `[1, last_verse]` that are absent from this
    /// translation's numbering, sorted ascending. Datasets guarantee that
    /// no two numerically-adjacent verses of the same chapter are missing.
    fn missing_verses(&self, book: u8, chapter: u16) -> &[u16];

    /// Full book name, or the empty string for an out-of-range id.
    fn book_name(&self, book: u8) -> &str;

    /// Standard abbreviated book name, or the empty string for an
    /// out-of-range id.
    fn book_abbreviation(&self, book: u8) -> &str;
}

// ──────────────────────────────────────────────
// Book input
// ──────────────────────────────────────────────

/// Tagged book input accepted by passage constructors: a full name, a
/// standard abbreviation, or a numeric 1-66 id.
///
/// `From` conversions let call sites pass `"Genesis"` or `1u8` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRef<'a> {
    /// Full book name, e.g. "Genesis". Case-insensitive.
    Name(&'a str),
    /// Standard abbreviation, e.g. "Gen". Case-insensitive.
    Abbreviation(&'a str),
    /// Numeric book id, 1 (Genesis) through 66 (Revelation).
    Id(u8),
}

impl BookRef<'_> {
    /// Resolve to a numeric book id via the provider. Names and
    /// abbreviations share one lookup; ids are range-checked directly.
    pub fn resolve(&self, bd: &dyn Versification) -> Result<u8, InvalidReference> {
        match self {
            BookRef::Name(s) | BookRef::Abbreviation(s) => bd
                .book_number(s)
                .ok_or_else(|| InvalidReference::UnknownBook((*s).to_owned())),
            BookRef::Id(n) => {
                if (1..=CANON_BOOKS).contains(n) {
                    Ok(*n)
                } else {
                    Err(InvalidReference::BookOutOfRange(*n))
                }
            }
        }
    }
}

impl<'a> From<&'a str> for BookRef<'a> {
    fn from(name: &'a str) -> Self {
        BookRef::Name(name)
    }
}

impl From<u8> for BookRef<'_> {
    fn from(id: u8) -> Self {
        BookRef::Id(id)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
