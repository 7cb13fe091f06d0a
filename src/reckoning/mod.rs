//! The Telisaran reckoning of dates and time.
//!
//! A year holds eight 45-day seasons followed by the five-day Festival of
//! the Hunt. Years are numbered from 1 within each of three eras. Every
//! date maps to a single integer, the seconds since the beginning of
//! time, and back again.

pub mod calendar;
pub mod datetime;
pub mod error;
pub mod parser;
pub mod timeline;
pub mod units;

pub use calendar::Calendar;
pub use datetime::DateTime;
pub use error::ReckoningError;
pub use parser::{EventLookup, NamedInstant, Parser, UnitOfTime};
pub use timeline::{Event, Timeline, TimelineError};
pub use units::{
    DateUnit, Day, Era, FestivalOfTheHunt, Hour, Minute, Season, SeasonKind, Second, Span, Year,
};
