use crate::domain::{CalendarDate, InvalidRangeError, SelectionState};
use serde::Serialize;

/// A committed check-in/check-out pair, ready to be read into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BookingRange {
    check_in: CalendarDate,
    check_out: CalendarDate,
}

impl BookingRange {
    pub fn new(check_in: CalendarDate, check_out: CalendarDate) -> Result<Self, InvalidRangeError> {
        if check_in >= check_out {
            return Err(InvalidRangeError {
                start: check_in,
                end: check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Only a full `Range` selection has a booking.
    pub fn from_selection(state: &SelectionState) -> Option<Self> {
        match *state {
            SelectionState::Range { start, end } => Some(Self {
                check_in: start,
                check_out: end,
            }),
            _ => None,
        }
    }

    pub fn check_in(&self) -> CalendarDate {
        self.check_in
    }

    pub fn check_out(&self) -> CalendarDate {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        self.check_in.days_until(self.check_out) as u32
    }

    /// Every night of the stay, check-in included and check-out excluded.
    pub fn nights_iter(&self) -> impl Iterator<Item = CalendarDate> {
        let check_in = self.check_in;
        (0..i64::from(self.nights())).map(move |i| check_in.add_days(i))
    }
}
