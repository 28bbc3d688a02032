//! Plain-data passage snapshots for storage backends.

use serde::{Deserialize, Serialize};

use crate::passage::Passage;

/// A serializable snapshot of a validated passage's bounds.
///
/// `start` and `end` are the canonical nine-digit `BBCCCVVV` keys (book
/// in the top two digits, chapter in the next three, verse in the last
/// three), so backends can index passages and answer range queries
/// without re-deriving structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageRecord {
    pub book: u8,
    pub start_chapter: u16,
    pub start_verse: u16,
    pub end_chapter: u16,
    pub end_verse: u16,
    pub start: u32,
    pub end: u32,
}

impl From<&Passage<'_>> for PassageRecord {
    fn from(p: &Passage<'_>) -> Self {
        PassageRecord {
            book: p.book(),
            start_chapter: p.start_chapter(),
            start_verse: p.start_verse(),
            end_chapter: p.end_chapter(),
            end_verse: p.end_verse(),
            start: p.start(),
            end: p.end(),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
