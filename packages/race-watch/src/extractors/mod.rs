//! Calendar extractors.

pub mod calendar;
pub mod listing;
pub mod mock;

pub use calendar::{calendar_url_for_year, CalendarExtractor, DEFAULT_CALENDAR_BASE};
pub use listing::{parse_calendar, ParsedCalendar};
pub use mock::MockExtractor;
