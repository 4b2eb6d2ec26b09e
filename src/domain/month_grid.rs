use crate::domain::CalendarDate;

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    /// False for the padding days borrowed from the adjacent months.
    pub belongs_to_visible_month: bool,
}

/// Six Sunday-first weeks covering one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    reference_month: CalendarDate,
    cells: [DayCell; GRID_CELLS],
}

impl MonthGrid {
    /// First day of the month this grid shows.
    pub fn reference_month(&self) -> CalendarDate {
        self.reference_month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn visible_days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.belongs_to_visible_month)
    }

    pub fn cell_for(&self, date: CalendarDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Build the 42-cell grid for the month containing `reference_month`.
///
/// Only the year and month of the input are used. The grid opens with the
/// tail of the previous month so that the 1st lands on its weekday column,
/// then runs through the month and pads with the start of the next one.
pub fn build_grid(reference_month: CalendarDate) -> MonthGrid {
    let first = reference_month.first_of_month();
    let leading = i64::from(first.weekday_from_sunday());
    let grid_start = first.add_days(-leading);

    let cells = std::array::from_fn(|offset| {
        let date = grid_start.add_days(offset as i64);
        DayCell {
            date,
            belongs_to_visible_month: date.year() == first.year() && date.month() == first.month(),
        }
    });

    MonthGrid {
        reference_month: first,
        cells,
    }
}
