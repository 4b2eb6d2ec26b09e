use crate::domain::{CalendarDate, MonthGrid, build_grid};

/// Which month a calendar widget is showing.
///
/// Lives next to, not inside, the selection engine: paging through months
/// never changes what has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    current: CalendarDate, // Always the 1st
}

impl MonthCursor {
    pub fn new(date: CalendarDate) -> Self {
        Self {
            current: date.first_of_month(),
        }
    }

    pub fn current(&self) -> CalendarDate {
        self.current
    }

    /// The month shown in the second pane of a two-month layout.
    pub fn following(&self) -> CalendarDate {
        self.current.next_month()
    }

    pub fn previous(&mut self) {
        self.current = self.current.previous_month();
    }

    pub fn next(&mut self) {
        self.current = self.current.next_month();
    }

    pub fn jump_to(&mut self, date: CalendarDate) {
        self.current = date.first_of_month();
    }

    /// True when `date` falls in the current month or, with `months == 2`,
    /// in the following one.
    pub fn shows(&self, date: CalendarDate, months: usize) -> bool {
        let first = date.first_of_month();
        first == self.current || (months > 1 && first == self.following())
    }

    pub fn grid(&self) -> MonthGrid {
        build_grid(self.current)
    }

    pub fn following_grid(&self) -> MonthGrid {
        build_grid(self.following())
    }
}
