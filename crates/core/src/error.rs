/// The single error kind raised when a passage reference cannot be
/// reconciled into a self-consistent verse span.
///
/// Construction either fully succeeds, producing a normalized passage, or
/// fails with one of these variants -- no partially-constructed passage
/// is observable. Operations on already-valid passages never return this
/// error; `truncate`/`extend` signal infeasible constraints with `None`
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReference {
    /// The book name or abbreviation did not resolve to a canon book.
    #[error("unknown book: {0}")]
    UnknownBook(String),

    /// A numeric book id outside the closed canon range 1-66.
    #[error("book number {0} outside canon range 1-66")]
    BookOutOfRange(u8),

    /// A supplied chapter or verse number was zero.
    #[error("chapter and verse numbers must be at least 1")]
    NonPositive,

    /// The supplied numbers cannot be reconciled for a single-chapter book.
    #[error("ambiguous reference for a single-chapter book")]
    AmbiguousSingleChapter,

    /// The start chapter does not exist in the book.
    #[error("book {book} has no chapter {chapter}")]
    ChapterOutOfRange { book: u8, chapter: u16 },

    /// The start verse does not exist in its chapter.
    #[error("chapter {chapter} of book {book} has no verse {verse}")]
    VerseOutOfRange { book: u8, chapter: u16, verse: u16 },

    /// The start reference falls after the end reference.
    #[error("start reference falls after end reference")]
    StartAfterEnd,

    /// Skipping missing verses pushed the start past the end; no verses
    /// remain in the span.
    #[error("no verses remain after skipping missing verses")]
    EmptyAfterRepair,
}
