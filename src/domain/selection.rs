use crate::domain::{BookingRange, CalendarDate, DayCell};
use log::debug;
use serde::Serialize;

/// Where a check-in/check-out selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    Empty,
    /// Check-in chosen, check-out pending.
    StartOnly { start: CalendarDate },
    /// Both ends chosen; `start < end` always holds.
    Range { start: CalendarDate, end: CalendarDate },
}

/// Rendering hint for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellClass {
    Disabled,
    SelectedStart,
    SelectedEnd,
    InRange,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click moved the selection; carries the new state.
    Updated(SelectionState),
    /// The click was absorbed without touching the selection.
    Ignored,
}

impl ClickOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, ClickOutcome::Updated(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid date range: check-in {start} must be before check-out {end}")]
pub struct InvalidRangeError {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

/// Two-click check-in/check-out state machine for one calendar widget.
///
/// Each widget owns its own engine. The engine never fails on a click:
/// clicks that fall outside the protocol are ignored and reported as
/// [`ClickOutcome::Ignored`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelectionEngine {
    state: SelectionState,
    /// Clicks on days before this are rejected.
    today: CalendarDate,
}

impl RangeSelectionEngine {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            state: SelectionState::Empty,
            today,
        }
    }

    /// An engine that starts from a persisted booking.
    pub fn seeded(
        start: CalendarDate,
        end: CalendarDate,
        today: CalendarDate,
    ) -> Result<Self, InvalidRangeError> {
        let mut engine = Self::new(today);
        engine.seed_range(start, end)?;
        Ok(engine)
    }

    pub fn current_selection(&self) -> SelectionState {
        self.state
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Move the past-date floor. The selection is left as it is.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Reset straight into `Range(start, end)`.
    ///
    /// Fails without touching the current selection when `start >= end`.
    pub fn seed_range(
        &mut self,
        start: CalendarDate,
        end: CalendarDate,
    ) -> Result<SelectionState, InvalidRangeError> {
        if start >= end {
            return Err(InvalidRangeError { start, end });
        }

        self.state = SelectionState::Range { start, end };
        debug!("selection seeded with {} -> {}", start, end);
        Ok(self.state)
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    pub fn on_day_clicked(&mut self, date: CalendarDate) -> ClickOutcome {
        if date < self.today {
            debug!("ignoring click on past day {} (today is {})", date, self.today);
            return ClickOutcome::Ignored;
        }

        let next = match self.state {
            SelectionState::Empty => SelectionState::StartOnly { start: date },
            SelectionState::StartOnly { start } if date > start => {
                SelectionState::Range { start, end: date }
            }
            SelectionState::StartOnly { start } if date < start => {
                SelectionState::StartOnly { start: date }
            }
            SelectionState::StartOnly { .. } => {
                debug!("ignoring repeated click on check-in day {}", date);
                return ClickOutcome::Ignored;
            }
            // A completed range is never extended; any click starts over.
            SelectionState::Range { .. } => SelectionState::StartOnly { start: date },
        };

        debug!("selection {:?} -> {:?}", self.state, next);
        self.state = next;
        ClickOutcome::Updated(next)
    }

    /// Like [`on_day_clicked`](Self::on_day_clicked), but padding cells from
    /// adjacent months are ignored.
    pub fn on_cell_clicked(&mut self, cell: &DayCell) -> ClickOutcome {
        if !cell.belongs_to_visible_month {
            debug!("ignoring click on padding day {}", cell.date);
            return ClickOutcome::Ignored;
        }
        self.on_day_clicked(cell.date)
    }

    /// How to draw `date`. Selected endpoints win over the past-day check so
    /// that a seeded stay which already started still shows its check-in.
    pub fn classify(&self, date: CalendarDate, today: CalendarDate) -> CellClass {
        match self.state {
            SelectionState::StartOnly { start } if date == start => CellClass::SelectedStart,
            SelectionState::Range { start, .. } if date == start => CellClass::SelectedStart,
            SelectionState::Range { end, .. } if date == end => CellClass::SelectedEnd,
            SelectionState::Range { start, end } if start < date && date < end => {
                CellClass::InRange
            }
            _ if date < today => CellClass::Disabled,
            _ => CellClass::Plain,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.state, SelectionState::Range { .. })
    }

    pub fn committed_range(&self) -> Option<BookingRange> {
        BookingRange::from_selection(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build_grid;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn engine() -> RangeSelectionEngine {
        RangeSelectionEngine::new(date(2025, 1, 1))
    }

    #[test]
    fn two_clicks_commit_a_range() {
        let mut engine = RangeSelectionEngine::new(date(2025, 6, 1));
        assert_eq!(engine.current_selection(), SelectionState::Empty);

        engine.on_day_clicked(date(2025, 7, 4));
        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 7, 4)
            }
        );

        engine.on_day_clicked(date(2025, 7, 10));
        assert_eq!(
            engine.current_selection(),
            SelectionState::Range {
                start: date(2025, 7, 4),
                end: date(2025, 7, 10)
            }
        );
        assert_eq!(
            engine.classify(date(2025, 7, 7), date(2025, 6, 1)),
            CellClass::InRange
        );
    }

    #[test]
    fn same_day_twice_stays_start_only() {
        let mut engine = engine();
        engine.on_day_clicked(date(2025, 3, 10));
        let outcome = engine.on_day_clicked(date(2025, 3, 10));

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 3, 10)
            }
        );
    }

    #[test]
    fn earlier_click_repicks_check_in() {
        let mut engine = engine();
        engine.on_day_clicked(date(2025, 3, 10));
        let outcome = engine.on_day_clicked(date(2025, 3, 5));

        let expected = SelectionState::StartOnly {
            start: date(2025, 3, 5),
        };
        assert_eq!(outcome, ClickOutcome::Updated(expected));
        assert_eq!(engine.current_selection(), expected);
    }

    #[test]
    fn click_after_range_starts_over() {
        let mut engine = engine();
        engine.on_day_clicked(date(2025, 3, 10));
        engine.on_day_clicked(date(2025, 3, 15));
        engine.on_day_clicked(date(2025, 3, 12));

        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 3, 12)
            }
        );

        // outside the old range, before and after
        let mut engine =
            RangeSelectionEngine::seeded(date(2025, 3, 10), date(2025, 3, 15), date(2025, 1, 1))
                .unwrap();
        engine.on_day_clicked(date(2025, 3, 2));
        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 3, 2)
            }
        );

        let mut engine =
            RangeSelectionEngine::seeded(date(2025, 3, 10), date(2025, 3, 15), date(2025, 1, 1))
                .unwrap();
        engine.on_day_clicked(date(2025, 3, 15));
        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 3, 15)
            }
        );
    }

    #[test]
    fn seeding_validates_order() {
        let mut engine = engine();
        let err = engine
            .seed_range(date(2025, 1, 20), date(2025, 1, 15))
            .unwrap_err();
        assert_eq!(
            err,
            InvalidRangeError {
                start: date(2025, 1, 20),
                end: date(2025, 1, 15)
            }
        );
        assert_eq!(engine.current_selection(), SelectionState::Empty);

        assert!(engine.seed_range(date(2025, 1, 15), date(2025, 1, 15)).is_err());

        engine
            .seed_range(date(2025, 1, 15), date(2025, 1, 20))
            .unwrap();
        assert_eq!(
            engine.current_selection(),
            SelectionState::Range {
                start: date(2025, 1, 15),
                end: date(2025, 1, 20)
            }
        );
    }

    #[test]
    fn failed_seed_keeps_previous_range() {
        let mut engine =
            RangeSelectionEngine::seeded(date(2025, 2, 1), date(2025, 2, 3), date(2025, 1, 1))
                .unwrap();
        assert!(engine.seed_range(date(2025, 2, 9), date(2025, 2, 8)).is_err());
        assert_eq!(
            engine.current_selection(),
            SelectionState::Range {
                start: date(2025, 2, 1),
                end: date(2025, 2, 3)
            }
        );
    }

    #[test]
    fn past_days_are_not_clickable() {
        let mut engine = RangeSelectionEngine::new(date(2025, 6, 1));
        assert_eq!(engine.on_day_clicked(date(2025, 5, 30)), ClickOutcome::Ignored);
        assert_eq!(engine.current_selection(), SelectionState::Empty);

        engine.on_day_clicked(date(2025, 6, 5));
        assert_eq!(engine.on_day_clicked(date(2025, 5, 31)), ClickOutcome::Ignored);
        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 6, 5)
            }
        );

        // today itself is fine
        assert!(engine.on_day_clicked(date(2025, 6, 1)).is_updated());
    }

    #[test]
    fn padding_cells_are_not_clickable() {
        let grid = build_grid(date(2025, 7, 1));
        let mut engine = RangeSelectionEngine::new(date(2025, 6, 1));

        let padding = grid.cell_for(date(2025, 8, 2)).unwrap();
        assert_eq!(engine.on_cell_clicked(padding), ClickOutcome::Ignored);
        assert_eq!(engine.current_selection(), SelectionState::Empty);

        let body = grid.cell_for(date(2025, 7, 2)).unwrap();
        assert!(engine.on_cell_clicked(body).is_updated());
    }

    #[test]
    fn classification_over_a_rendered_grid() {
        let today = date(2025, 7, 3);
        let (start, end) = (date(2025, 7, 8), date(2025, 7, 19));
        let engine = RangeSelectionEngine::seeded(start, end, today).unwrap();

        for cell in build_grid(date(2025, 7, 1)).cells() {
            let class = engine.classify(cell.date, today);
            let expected = if cell.date == start {
                CellClass::SelectedStart
            } else if cell.date == end {
                CellClass::SelectedEnd
            } else if start < cell.date && cell.date < end {
                CellClass::InRange
            } else if cell.date < today {
                CellClass::Disabled
            } else {
                CellClass::Plain
            };
            assert_eq!(class, expected, "{}", cell.date);

            // pure query
            assert_eq!(engine.classify(cell.date, today), class);
        }
        assert_eq!(engine.current_selection(), SelectionState::Range { start, end });
    }

    #[test]
    fn start_only_marks_just_the_check_in() {
        let mut engine = engine();
        engine.on_day_clicked(date(2025, 4, 10));

        assert_eq!(engine.classify(date(2025, 4, 10), date(2025, 1, 1)), CellClass::SelectedStart);
        assert_eq!(engine.classify(date(2025, 4, 11), date(2025, 1, 1)), CellClass::Plain);
        assert_eq!(engine.classify(date(2024, 12, 31), date(2025, 1, 1)), CellClass::Disabled);
    }

    #[test]
    fn seeded_stay_in_progress_keeps_its_endpoints() {
        let today = date(2025, 7, 10);
        let engine =
            RangeSelectionEngine::seeded(date(2025, 7, 8), date(2025, 7, 12), today).unwrap();

        assert_eq!(engine.classify(date(2025, 7, 8), today), CellClass::SelectedStart);
        assert_eq!(engine.classify(date(2025, 7, 9), today), CellClass::InRange);
        assert_eq!(engine.classify(date(2025, 7, 7), today), CellClass::Disabled);
    }

    #[test]
    fn engines_are_independent() {
        let mut check_in_widget = engine();
        let mut check_out_widget = check_in_widget.clone();

        check_in_widget.on_day_clicked(date(2025, 8, 1));
        check_out_widget.on_day_clicked(date(2025, 8, 20));
        check_out_widget.on_day_clicked(date(2025, 8, 25));

        assert_eq!(
            check_in_widget.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 8, 1)
            }
        );
        assert!(check_out_widget.is_committed());
    }

    #[test]
    fn ranges_stay_ordered_under_any_click_sequence() {
        let clicks = [12, 3, 3, 20, 7, 7, 1, 28, 15, 14, 14, 30, 2];
        let mut engine = engine();

        for day in clicks {
            engine.on_day_clicked(date(2025, 9, day));
            if let SelectionState::Range { start, end } = engine.current_selection() {
                assert!(start < end);
            }
        }
    }

    #[test]
    fn moving_today_leaves_selection_alone() {
        let mut engine = engine();
        engine.on_day_clicked(date(2025, 2, 2));
        engine.set_today(date(2025, 3, 1));

        assert_eq!(
            engine.current_selection(),
            SelectionState::StartOnly {
                start: date(2025, 2, 2)
            }
        );
        assert_eq!(engine.on_day_clicked(date(2025, 2, 20)), ClickOutcome::Ignored);
    }

    #[test]
    fn committed_range_and_clear() {
        let mut engine = engine();
        assert!(engine.committed_range().is_none());

        engine.on_day_clicked(date(2025, 5, 1));
        assert!(engine.committed_range().is_none());

        engine.on_day_clicked(date(2025, 5, 4));
        let range = engine.committed_range().unwrap();
        assert_eq!(range.check_in(), date(2025, 5, 1));
        assert_eq!(range.nights(), 3);

        engine.clear();
        assert_eq!(engine.current_selection(), SelectionState::Empty);
    }
}
