use crate::domain::{
    BookingRange, CalendarDate, DateParseError, RangeSelectionEngine, SelectionState,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The dates block of a booking request, as the storefront sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub nights: u32,
}

impl From<&BookingRange> for BookingPayload {
    fn from(range: &BookingRange) -> Self {
        Self {
            check_in: range.check_in(),
            check_out: range.check_out(),
            nights: range.nights(),
        }
    }
}

pub fn parse_date(input: &str) -> Result<CalendarDate, DateParseError> {
    input.parse()
}

/// Build an engine for an edit screen from the persisted check-in/check-out.
pub fn seed_from_iso(
    check_in: &str,
    check_out: &str,
    today: CalendarDate,
) -> Result<RangeSelectionEngine> {
    let start = parse_date(check_in).context("Failed to parse persisted check-in date")?;
    let end = parse_date(check_out).context("Failed to parse persisted check-out date")?;

    RangeSelectionEngine::seeded(start, end, today)
        .context("Persisted booking has an invalid date range")
}

pub fn seed_from_payload(json: &str, today: CalendarDate) -> Result<RangeSelectionEngine> {
    let payload: BookingPayload =
        serde_json::from_str(json).context("Failed to deserialize booking payload")?;

    RangeSelectionEngine::seeded(payload.check_in, payload.check_out, today)
        .context("Booking payload has an invalid date range")
}

pub fn to_payload_json(range: &BookingRange) -> Result<String> {
    serde_json::to_string(&BookingPayload::from(range))
        .context("Failed to serialize booking payload")
}

pub fn selection_json(state: &SelectionState) -> Result<String> {
    serde_json::to_string(state).context("Failed to serialize selection")
}
