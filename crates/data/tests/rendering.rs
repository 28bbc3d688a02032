//! Citation-string rendering tests against the real ESV canon tables.

use passage_core::{Passage, PassageCollection, EN_DASH};
use passage_data::esv;

// ── Single passages ──────────────────────────────────────────────────

#[test]
fn whole_book_renders_bare_name() {
    let p = Passage::whole_book("Genesis", esv()).unwrap();
    assert_eq!(p.to_string(), "Genesis");
    assert_eq!(p.abbr(), "Gen");
}

#[test]
fn whole_chapter_renders_book_and_chapter() {
    let p = Passage::chapter("Luke", 15, esv()).unwrap();
    assert_eq!(p.to_string(), "Luke 15");
}

#[test]
fn single_verse_renders_colon_form() {
    let p = Passage::verse("John", 3, 16, esv()).unwrap();
    assert_eq!(p.to_string(), "John 3:16");
    assert_eq!(p.abbr(), "Joh 3:16");
}

#[test]
fn verse_range_renders_with_dash() {
    let p = Passage::range("Rom", 3, 21, 3, 26, esv()).unwrap();
    assert_eq!(p.to_string(), "Romans 3:21-26");
    assert_eq!(
        p.reference_string(false, EN_DASH),
        "Romans 3:21\u{2013}26"
    );
}

#[test]
fn cross_chapter_range_renders_both_bounds() {
    let p = Passage::range("Luke", 1, 39, 2, 7, esv()).unwrap();
    assert_eq!(p.to_string(), "Luke 1:39-2:7");
}

#[test]
fn complete_chapter_run_renders_chapter_range() {
    let p = Passage::new("Isaiah", Some(40), None, Some(55), None, esv()).unwrap();
    assert_eq!(p.to_string(), "Isaiah 40-55");
}

#[test]
fn philemon_renders_without_chapter_numbers() {
    assert_eq!(
        Passage::whole_book("Phm", esv()).unwrap().to_string(),
        "Philemon"
    );
    assert_eq!(
        Passage::chapter("Phm", 2, esv()).unwrap().to_string(),
        "Philemon 2"
    );
    assert_eq!(
        Passage::new("Phm", Some(4), None, Some(7), None, esv())
            .unwrap()
            .to_string(),
        "Philemon 4-7"
    );
}

#[test]
fn psalms_renders_singular_for_one_chapter() {
    let one = Passage::chapter("Psa", 23, esv()).unwrap();
    assert_eq!(one.to_string(), "Psalm 23");
    let verse = Passage::verse("Psa", 23, 1, esv()).unwrap();
    assert_eq!(verse.to_string(), "Psalm 23:1");
    let run = Passage::new("Psa", Some(20), None, Some(25), None, esv()).unwrap();
    assert_eq!(run.to_string(), "Psalms 20-25");
    assert_eq!(one.abbr(), "Psa 23");
}

// ── Collections ──────────────────────────────────────────────────────

#[test]
fn empty_collection_renders_empty_string() {
    assert_eq!(PassageCollection::new().to_string(), "");
}

#[test]
fn opening_complete_chapters_render_as_bare_list() {
    let coll = Passage::chapter("Matthew", 5, esv()).unwrap()
        + Passage::chapter("Matthew", 7, esv()).unwrap();
    assert_eq!(coll.to_string(), "Matthew 5, 7");
}

#[test]
fn later_complete_chapter_gets_ch_prefix() {
    let coll = Passage::range("Matthew", 5, 3, 5, 12, esv()).unwrap()
        + Passage::chapter("Matthew", 7, esv()).unwrap();
    assert_eq!(coll.to_string(), "Matthew 5:3-12, ch. 7");
}

#[test]
fn later_complete_chapter_run_gets_chs_prefix() {
    let coll = Passage::range("Matthew", 5, 3, 5, 12, esv()).unwrap()
        + Passage::chapter("Matthew", 6, esv()).unwrap()
        + Passage::chapter("Matthew", 7, esv()).unwrap();
    assert_eq!(coll.to_string(), "Matthew 5:3-12, chs. 6, 7");
}

#[test]
fn same_chapter_verse_ranges_fold_into_vv_fragment() {
    let coll = Passage::range("Matthew", 5, 3, 5, 4, esv()).unwrap()
        + Passage::verse("Matthew", 5, 7, esv()).unwrap();
    assert_eq!(coll.to_string(), "Matthew 5 vv. 3-4, 7");
}

#[test]
fn cross_chapter_span_stands_alone_in_a_group() {
    let coll = Passage::chapter("Mark", 1, esv()).unwrap()
        + Passage::range("Mark", 5, 2, 7, 28, esv()).unwrap();
    assert_eq!(coll.to_string(), "Mark 1, 5:2-7:28");
}

#[test]
fn different_books_joined_with_semicolons() {
    let coll = Passage::whole_book("Genesis", esv()).unwrap()
        + Passage::verse("John", 3, 16, esv()).unwrap();
    assert_eq!(coll.to_string(), "Genesis; John 3:16");
}

#[test]
fn non_contiguous_same_book_runs_stay_separate() {
    let mut coll = PassageCollection::new();
    coll.append(Passage::chapter("Luke", 1, esv()).unwrap());
    coll.append(Passage::verse("John", 3, 16, esv()).unwrap());
    coll.append(Passage::chapter("Luke", 3, esv()).unwrap());
    assert_eq!(coll.to_string(), "Luke 1; John 3:16; Luke 3");
}

#[test]
fn single_chapter_book_group_renders_verse_fragments() {
    let coll = Passage::new("Phm", None, Some(1), None, Some(3), esv()).unwrap()
        + Passage::chapter("Phm", 5, esv()).unwrap();
    assert_eq!(coll.to_string(), "Philemon 1-3, 5");
}

#[test]
fn mixed_groups_combine_all_fragment_kinds() {
    let coll = Passage::chapter("Genesis", 1, esv()).unwrap()
        + Passage::chapter("Genesis", 2, esv()).unwrap()
        + Passage::range("Exodus", 20, 1, 20, 17, esv()).unwrap();
    assert_eq!(coll.to_string(), "Genesis 1, 2; Exodus 20:1-17");
    assert_eq!(coll.abbr(), "Gen 1, 2; Exo 20:1-17");
}

#[test]
fn single_member_collection_honors_rendering_options() {
    let coll =
        PassageCollection::from_passages(vec![Passage::verse("John", 3, 16, esv()).unwrap()]);
    assert_eq!(coll.reference_string(true, EN_DASH), "Joh 3:16");
}

#[test]
fn sorted_collection_renders_in_canonical_order() {
    let mut coll = Passage::verse("John", 3, 16, esv()).unwrap()
        + Passage::chapter("Genesis", 1, esv()).unwrap()
        + Passage::verse("Genesis", 1, 1, esv()).unwrap();
    coll.sort();
    assert_eq!(coll.to_string(), "Genesis 1, 1:1; John 3:16");
}
