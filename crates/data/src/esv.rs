//! The ESV versification provider.

use passage_core::Versification;

use crate::tables::{BOOK_ALIASES, BOOK_NAMES, LAST_VERSES, MISSING_VERSES};

/// Canon structure of the English Standard Version. Entirely
/// table-driven and stateless; a shared [`ESV`](crate::ESV) instance is
/// available through the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Esv;

/// Table index for a 1-based book id, when in range.
fn index(book: u8) -> Option<usize> {
    if (1..=66).contains(&book) {
        Some(usize::from(book) - 1)
    } else {
        None
    }
}

impl Versification for Esv {
    fn book_number(&self, name: &str) -> Option<u8> {
        let wanted = name.trim();
        for (i, (full, abbr)) in BOOK_NAMES.iter().enumerate() {
            if full.eq_ignore_ascii_case(wanted) || abbr.eq_ignore_ascii_case(wanted) {
                return Some(i as u8 + 1);
            }
        }
        BOOK_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
            .map(|(_, book)| *book)
    }

    fn chapter_count(&self, book: u8) -> u16 {
        index(book).map_or(0, |i| LAST_VERSES[i].len() as u16)
    }

    fn last_verse(&self, book: u8, chapter: u16) -> u16 {
        index(book)
            .and_then(|i| {
                LAST_VERSES[i]
                    .get(usize::from(chapter).checked_sub(1)?)
                    .copied()
            })
            .unwrap_or(0)
    }

    fn missing_verses(&self, book: u8, chapter: u16) -> &[u16] {
        MISSING_VERSES
            .iter()
            .find(|(b, c, _)| *b == book && *c == chapter)
            .map_or(&[], |(_, _, verses)| verses)
    }

    fn book_name(&self, book: u8) -> &str {
        index(book).map_or("", |i| BOOK_NAMES[i].0)
    }

    fn book_abbreviation(&self, book: u8) -> &str {
        index(book).map_or("", |i| BOOK_NAMES[i].1)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_lookup_is_case_insensitive_over_names_and_abbreviations() {
        assert_eq!(Esv.book_number("Genesis"), Some(1));
        assert_eq!(Esv.book_number("genesis"), Some(1));
        assert_eq!(Esv.book_number("GEN"), Some(1));
        assert_eq!(Esv.book_number("Phm"), Some(57));
        assert_eq!(Esv.book_number("revelation"), Some(66));
        assert_eq!(Esv.book_number("1 Corinthians"), Some(46));
        assert_eq!(Esv.book_number("1co"), Some(46));
    }

    #[test]
    fn book_lookup_accepts_aliases() {
        assert_eq!(Esv.book_number("Psalm"), Some(19));
        assert_eq!(Esv.book_number("Song of Songs"), Some(22));
    }

    #[test]
    fn book_lookup_rejects_unknown_names() {
        assert_eq!(Esv.book_number("Atlantis"), None);
        assert_eq!(Esv.book_number(""), None);
    }

    #[test]
    fn chapter_counts_match_the_canon() {
        assert_eq!(Esv.chapter_count(1), 50); // Genesis
        assert_eq!(Esv.chapter_count(19), 150); // Psalms
        assert_eq!(Esv.chapter_count(57), 1); // Philemon
        assert_eq!(Esv.chapter_count(66), 22); // Revelation
        assert_eq!(Esv.chapter_count(0), 0);
        assert_eq!(Esv.chapter_count(67), 0);
    }

    #[test]
    fn last_verses_match_the_canon() {
        assert_eq!(Esv.last_verse(1, 1), 31); // Genesis 1
        assert_eq!(Esv.last_verse(19, 119), 176); // Psalm 119
        assert_eq!(Esv.last_verse(43, 3), 36); // John 3
        assert_eq!(Esv.last_verse(57, 1), 25); // Philemon
        assert_eq!(Esv.last_verse(1, 51), 0);
        assert_eq!(Esv.last_verse(1, 0), 0);
    }

    #[test]
    fn missing_verses_cover_the_esv_omissions() {
        assert_eq!(Esv.missing_verses(44, 8), &[37]); // Acts 8:37
        assert_eq!(Esv.missing_verses(43, 5), &[4]); // John 5:4
        assert_eq!(Esv.missing_verses(41, 9), &[44, 46]); // Mark 9
        assert!(Esv.missing_verses(1, 1).is_empty());
        assert!(Esv.missing_verses(67, 1).is_empty());
    }

    #[test]
    fn no_adjacent_missing_verses_within_a_chapter() {
        for (_, _, verses) in crate::tables::MISSING_VERSES {
            for pair in verses.windows(2) {
                assert!(pair[1] > pair[0] + 1);
            }
        }
    }

    #[test]
    fn missing_verses_exist_within_their_chapters() {
        for (book, chapter, verses) in crate::tables::MISSING_VERSES {
            let last = Esv.last_verse(*book, *chapter);
            for v in *verses {
                assert!((1..=last).contains(v));
            }
        }
    }

    #[test]
    fn book_names_round_trip_through_lookup() {
        for book in 1..=66u8 {
            assert_eq!(Esv.book_number(Esv.book_name(book)), Some(book));
            assert_eq!(Esv.book_number(Esv.book_abbreviation(book)), Some(book));
        }
    }

    #[test]
    fn every_chapter_has_at_least_one_verse() {
        for book in 1..=66u8 {
            assert!(Esv.chapter_count(book) >= 1);
            for chapter in 1..=Esv.chapter_count(book) {
                assert!(Esv.last_verse(book, chapter) >= 1);
            }
        }
    }
}
