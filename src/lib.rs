//! Telisar: the reckoning of time and the naming of folk in the world of
//! Telisar.
//!
//! The calendar engine converts between structured Telisaran dates and a
//! flat count of seconds since the beginning of time, parses relative date
//! expressions against a campaign timeline, and the language module builds
//! names from syllable grammars.

pub mod config;
pub mod language;
pub mod logging;
pub mod reckoning;
