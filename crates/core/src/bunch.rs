//! Intra-book passage folding for collection rendering.
//!
//! A [`Bunch`] consumes one contiguous run of same-book passages (the
//! book being multi-chapter) and folds adjacent same-kind passages into
//! slots that each render as one citation fragment: runs of complete
//! chapters, runs of verse ranges within one chapter, and standalone
//! arbitrary ranges. Bunches are built, rendered, and discarded within a
//! single [`PassageCollection::reference_string`] call.
//!
//! [`PassageCollection::reference_string`]:
//! crate::PassageCollection::reference_string

use crate::passage::Passage;

struct Slot<'v> {
    passages: Vec<Passage<'v>>,
    /// Whether every passage in this slot is a complete chapter.
    complete_chapters: bool,
}

/// Accumulator folding same-book passages into renderable slots.
pub(crate) struct Bunch<'v> {
    slots: Vec<Slot<'v>>,
    /// Slot index of the trailing complete-chapter run, if the previous
    /// addition was a complete chapter.
    last_complete_chapter_slot: Option<usize>,
    /// `(chapter, slot index)` of the trailing same-chapter verse run.
    last_partial_chapter: Option<(u16, usize)>,
}

impl<'v> Bunch<'v> {
    pub(crate) fn new() -> Self {
        Bunch {
            slots: Vec::new(),
            last_complete_chapter_slot: None,
            last_partial_chapter: None,
        }
    }

    /// Classify a passage and either extend the matching trailing slot
    /// or open a new one.
    pub(crate) fn add(&mut self, passage: Passage<'v>) {
        if passage.is_complete_chapter() {
            match self.last_complete_chapter_slot {
                // Extend the running chapter list.
                Some(i) => self.slots[i].passages.push(passage),
                None => {
                    self.push_slot(passage, true);
                    self.last_complete_chapter_slot = Some(self.slots.len() - 1);
                }
            }
            self.last_partial_chapter = None;
        } else {
            if passage.start_chapter() == passage.end_chapter() {
                match self.last_partial_chapter {
                    // Same chapter as the previous verse range: extend.
                    Some((chapter, i)) if chapter == passage.start_chapter() => {
                        self.slots[i].passages.push(passage);
                    }
                    _ => {
                        let chapter = passage.start_chapter();
                        self.push_slot(passage, false);
                        self.last_partial_chapter = Some((chapter, self.slots.len() - 1));
                    }
                }
            } else {
                // An arbitrary cross-chapter range always stands alone.
                self.last_partial_chapter = None;
                self.push_slot(passage, false);
            }
            self.last_complete_chapter_slot = None;
        }
    }

    fn push_slot(&mut self, passage: Passage<'v>, complete_chapters: bool) {
        self.slots.push(Slot {
            passages: vec![passage],
            complete_chapters,
        });
    }

    /// Render the accumulated slots as one book-prefixed fragment.
    pub(crate) fn render(&self, abbreviated: bool, dash: &str) -> String {
        let first = match self.slots.first().and_then(|s| s.passages.first()) {
            Some(p) => p,
            None => return String::new(),
        };
        // The bunch covers multiple chapters, so the plural book name is
        // always the right one; the Psalm singular rule never applies.
        let bd = first.versification();
        let book = if abbreviated {
            bd.book_abbreviation(first.book())
        } else {
            bd.book_name(first.book())
        };

        let chapters_of = |p: &Passage<'v>| {
            if p.start_chapter() == p.end_chapter() {
                p.start_chapter().to_string()
            } else {
                format!("{}{}{}", p.start_chapter(), dash, p.end_chapter())
            }
        };
        let verses_of = |p: &Passage<'v>| {
            if p.start_verse() == p.end_verse() {
                p.start_verse().to_string()
            } else {
                format!("{}{}{}", p.start_verse(), dash, p.end_verse())
            }
        };

        let mut fragments = Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.complete_chapters {
                let list: Vec<String> = slot.passages.iter().map(|p| chapters_of(p)).collect();
                if i == 0 {
                    // The fragment opens the group, so bare chapter
                    // numbers are unambiguous ("Luke 1, 3").
                    fragments.push(list.join(", "));
                } else if slot.passages.len() == 1 {
                    fragments.push(format!("ch. {}", list[0]));
                } else {
                    fragments.push(format!("chs. {}", list.join(", ")));
                }
            } else if slot.passages.len() == 1 {
                let p = &slot.passages[0];
                if p.start_chapter() == p.end_chapter() {
                    fragments.push(format!("{}:{}", p.start_chapter(), verses_of(p)));
                } else {
                    fragments.push(format!(
                        "{}:{}{}{}:{}",
                        p.start_chapter(),
                        p.start_verse(),
                        dash,
                        p.end_chapter(),
                        p.end_verse()
                    ));
                }
            } else {
                // Multi-passage verse slots are same-chapter by
                // construction.
                let list: Vec<String> = slot.passages.iter().map(|p| verses_of(p)).collect();
                fragments.push(format!(
                    "{} vv. {}",
                    slot.passages[0].start_chapter(),
                    list.join(", ")
                ));
            }
        }
        format!("{} {}", book, fragments.join(", "))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passage::tests::Fixture;

    fn bunch_of(passages: Vec<Passage<'static>>) -> Bunch<'static> {
        let mut bunch = Bunch::new();
        for p in passages {
            bunch.add(p);
        }
        bunch
    }

    fn chapter(ch: u16) -> Passage<'static> {
        Passage::chapter("Alpha", ch, &Fixture).unwrap()
    }

    fn range(sc: u16, sv: u16, ec: u16, ev: u16) -> Passage<'static> {
        Passage::range("Alpha", sc, sv, ec, ev, &Fixture).unwrap()
    }

    #[test]
    fn empty_bunch_renders_empty_string() {
        assert_eq!(Bunch::new().render(false, "-"), "");
    }

    #[test]
    fn opening_complete_chapters_render_bare() {
        let b = bunch_of(vec![chapter(1), chapter(3)]);
        assert_eq!(b.render(false, "-"), "Alpha 1, 3");
    }

    #[test]
    fn later_complete_chapter_gets_ch_prefix() {
        let b = bunch_of(vec![range(1, 2, 1, 4), chapter(3)]);
        assert_eq!(b.render(false, "-"), "Alpha 1:2-4, ch. 3");
    }

    #[test]
    fn later_complete_chapter_run_gets_chs_prefix() {
        let b = bunch_of(vec![range(1, 2, 1, 4), chapter(2), chapter(3)]);
        assert_eq!(b.render(false, "-"), "Alpha 1:2-4, chs. 2, 3");
    }

    #[test]
    fn same_chapter_verse_ranges_fold_into_vv_fragment() {
        let b = bunch_of(vec![range(1, 2, 1, 3), range(1, 6, 1, 6), range(1, 9, 1, 10)]);
        assert_eq!(b.render(false, "-"), "Alpha 1 vv. 2-3, 6, 9-10");
    }

    #[test]
    fn different_chapter_verse_ranges_open_new_slots() {
        let b = bunch_of(vec![range(1, 2, 1, 3), range(2, 5, 2, 6)]);
        assert_eq!(b.render(false, "-"), "Alpha 1:2-3, 2:5-6");
    }

    #[test]
    fn cross_chapter_range_stands_alone() {
        let b = bunch_of(vec![range(1, 5, 2, 3)]);
        assert_eq!(b.render(false, "-"), "Alpha 1:5-2:3");
    }

    #[test]
    fn cross_chapter_range_resets_both_trackers() {
        // The chapter-2 verse range after the cross-chapter span must not
        // fold into the earlier chapter-2 slot.
        let b = bunch_of(vec![
            range(2, 1, 2, 2),
            range(1, 5, 2, 3),
            range(2, 5, 2, 6),
        ]);
        assert_eq!(b.render(false, "-"), "Alpha 2:1-2, 1:5-2:3, 2:5-6");
    }

    #[test]
    fn complete_chapter_interrupts_verse_run() {
        let b = bunch_of(vec![range(1, 2, 1, 3), chapter(2), range(1, 6, 1, 7)]);
        assert_eq!(b.render(false, "-"), "Alpha 1:2-3, ch. 2, 1:6-7");
    }

    #[test]
    fn abbreviated_bunch_uses_abbreviated_book_name() {
        let b = bunch_of(vec![range(1, 2, 1, 4), chapter(3)]);
        assert_eq!(b.render(true, "-"), "Alp 1:2-4, ch. 3");
    }
}
