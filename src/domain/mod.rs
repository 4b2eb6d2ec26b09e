pub mod booking_range;
pub mod calendar_date;
pub mod month_cursor;
pub mod month_grid;
pub mod selection;

pub use booking_range::*;
pub use calendar_date::*;
pub use month_cursor::*;
pub use month_grid::*;
pub use selection::*;
