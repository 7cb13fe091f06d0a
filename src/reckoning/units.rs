/// Calendar units: one type per granularity of the Telisaran reckoning.
///
/// Every unit knows its 1-indexed `number` within its parent and its
/// contribution to an absolute offset, `as_seconds`. Clock units (hour,
/// minute, second) are 0-indexed and contribute `number * length`.
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::sync::OnceLock;

use super::error::ReckoningError;

/// Behaviour shared by every calendar unit.
pub trait DateUnit {
    /// Position of the unit within its immediate parent.
    fn number(&self) -> i64;

    /// Contribution of the unit to an absolute offset, scoped to its parent.
    fn as_seconds(&self) -> i64;
}

/// Comparison and arithmetic in integer seconds. Units carry no
/// `from_seconds` reconstructor, so arithmetic yields raw seconds.
macro_rules! unit_seconds_ops {
    ($($unit:ty),* $(,)?) => {$(
        impl PartialEq for $unit {
            fn eq(&self, other: &Self) -> bool {
                self.as_seconds() == other.as_seconds()
            }
        }

        impl Eq for $unit {}

        impl PartialOrd for $unit {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $unit {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_seconds().cmp(&other.as_seconds())
            }
        }

        impl Add<i64> for &$unit {
            type Output = i64;
            fn add(self, seconds: i64) -> i64 {
                self.as_seconds() + seconds
            }
        }

        impl Sub<i64> for &$unit {
            type Output = i64;
            fn sub(self, seconds: i64) -> i64 {
                self.as_seconds() - seconds
            }
        }

        impl Add for &$unit {
            type Output = i64;
            fn add(self, other: Self) -> i64 {
                self.as_seconds() + other.as_seconds()
            }
        }

        impl Sub for &$unit {
            type Output = i64;
            fn sub(self, other: Self) -> i64 {
                self.as_seconds() - other.as_seconds()
            }
        }
    )*};
}

unit_seconds_ops!(Second, Minute, Hour, Day, Span, Season, Year, Era);

/// English ordinal for a positive number: 1st, 2nd, 3rd, 11th, 22nd.
pub(crate) fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[derive(Debug, Clone, Copy, Default, Hash)]
pub struct Second {
    second: u8,
}

impl Second {
    pub const LENGTH_IN_SECONDS: i64 = 1;

    pub fn new(second: i64) -> Result<Self, ReckoningError> {
        if !(0..=59).contains(&second) {
            return Err(ReckoningError::InvalidSecond { second });
        }
        Ok(Self {
            second: second as u8,
        })
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

impl DateUnit for Second {
    fn number(&self) -> i64 {
        self.second as i64
    }

    fn as_seconds(&self) -> i64 {
        self.number() * Self::LENGTH_IN_SECONDS
    }
}

/// One minute on the Telisaran clock (0–59).
#[derive(Debug, Clone, Copy, Default, Hash)]
pub struct Minute {
    minute: u8,
}

impl Minute {
    pub const LENGTH_IN_SECONDS: i64 = 60;

    pub fn new(minute: i64) -> Result<Self, ReckoningError> {
        if !(0..=59).contains(&minute) {
            return Err(ReckoningError::InvalidMinute { minute });
        }
        Ok(Self {
            minute: minute as u8,
        })
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl DateUnit for Minute {
    fn number(&self) -> i64 {
        self.minute as i64
    }

    fn as_seconds(&self) -> i64 {
        self.number() * Self::LENGTH_IN_SECONDS
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minute)
    }
}

/// One hour on the Telisaran clock (0–23).
///
/// The four quarter hours of the day carry names; every other hour is
/// spoken as an ordinal ("7th hour").
#[derive(Debug, Clone, Copy, Default, Hash)]
pub struct Hour {
    hour: u8,
}

impl Hour {
    pub const LENGTH_IN_SECONDS: i64 = 60 * Minute::LENGTH_IN_SECONDS;

    pub const NAMES: [(u8, &'static str); 4] = [
        (0, "Black Hour"),
        (6, "Soul's Hour"),
        (12, "Sun's Hour"),
        (18, "Grey Hour"),
    ];

    pub fn new(hour: i64) -> Result<Self, ReckoningError> {
        if !(0..=23).contains(&hour) {
            return Err(ReckoningError::InvalidHour { hour });
        }
        Ok(Self { hour: hour as u8 })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn name(&self) -> String {
        Self::NAMES
            .iter()
            .find(|(hour, _)| *hour == self.hour)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| format!("{} hour", ordinal(self.hour as i64)))
    }
}

impl DateUnit for Hour {
    fn number(&self) -> i64 {
        self.hour as i64
    }

    fn as_seconds(&self) -> i64 {
        self.number() * Self::LENGTH_IN_SECONDS
    }
}

/// Which day-name table a day resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonKind {
    Ordinary,
    Festival,
}

/// One day of a season.
///
/// A day only remembers what kind of season it belongs to, which is all
/// it needs to resolve its name.
#[derive(Debug, Clone, Copy)]
pub struct Day {
    day_of_season: u8,
    kind: SeasonKind,
}

impl Day {
    pub const LENGTH_IN_SECONDS: i64 = 24 * Hour::LENGTH_IN_SECONDS;

    pub const NAMES: [&'static str; 5] = ["Syfdag", "Mimdag", "Wodag", "Thordag", "Freydag"];

    /// Create a day, validated against the day count of `season`.
    pub fn new(day_of_season: i64, season: &Season) -> Result<Self, ReckoningError> {
        let max = season.length_in_days();
        if day_of_season < 1 || day_of_season > max as i64 {
            return Err(ReckoningError::InvalidDay {
                day: day_of_season,
                season: season.name(),
                max,
            });
        }
        Ok(Self {
            day_of_season: day_of_season as u8,
            kind: season.kind(),
        })
    }

    pub fn day_of_season(&self) -> u8 {
        self.day_of_season
    }

    /// The span of the season this day falls in (1–9).
    pub fn span(&self) -> Span {
        Span {
            span_of_season: (self.day_of_season - 1) / Span::LENGTH_IN_DAYS + 1,
        }
    }

    /// The day of the span (1–5).
    pub fn day_of_span(&self) -> u8 {
        (self.day_of_season - 1) % Span::LENGTH_IN_DAYS + 1
    }

    pub fn kind(&self) -> SeasonKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        let index = (self.day_of_span() - 1) as usize;
        match self.kind {
            SeasonKind::Ordinary => Self::NAMES[index],
            SeasonKind::Festival => FestivalOfTheHunt::DAY_NAMES[index],
        }
    }
}

impl DateUnit for Day {
    fn number(&self) -> i64 {
        self.day_of_season as i64
    }

    fn as_seconds(&self) -> i64 {
        (self.number() - 1) * Self::LENGTH_IN_SECONDS
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A span (week) of five days within a season.
#[derive(Debug, Clone, Copy, Hash)]
pub struct Span {
    span_of_season: u8,
}

impl Span {
    pub const LENGTH_IN_DAYS: u8 = Day::NAMES.len() as u8;
    pub const LENGTH_IN_SECONDS: i64 = Self::LENGTH_IN_DAYS as i64 * Day::LENGTH_IN_SECONDS;

    pub fn new(span_of_season: i64) -> Result<Self, ReckoningError> {
        let max = Season::LENGTH_IN_SPANS;
        if span_of_season < 1 || span_of_season > max as i64 {
            return Err(ReckoningError::InvalidSpan {
                span: span_of_season,
                max,
            });
        }
        Ok(Self {
            span_of_season: span_of_season as u8,
        })
    }

    pub fn span_of_season(&self) -> u8 {
        self.span_of_season
    }
}

impl DateUnit for Span {
    fn number(&self) -> i64 {
        self.span_of_season as i64
    }

    fn as_seconds(&self) -> i64 {
        (self.number() - 1) * Self::LENGTH_IN_SECONDS
    }
}

/// A season (month) of a Telisaran year.
///
/// Seasons 1–8 are the ordinary animal seasons of 45 days. Season 9 is
/// the Festival of the Hunt, see [`FestivalOfTheHunt`]. The day list is
/// built on first access and cached.
#[derive(Debug, Clone)]
pub struct Season {
    season_of_year: u8,
    year: u64,
    kind: SeasonKind,
    days: OnceLock<Vec<Day>>,
}

impl Season {
    pub const NAMES: [&'static str; 8] = [
        "Fox", "Owl", "Wolf", "Eagle", "Shark", "Lion", "Raven", "Bear",
    ];
    pub const LENGTH_IN_SPANS: u8 = 9;
    pub const LENGTH_IN_DAYS: u8 = Self::LENGTH_IN_SPANS * Span::LENGTH_IN_DAYS;
    pub const LENGTH_IN_SECONDS: i64 = Self::LENGTH_IN_DAYS as i64 * Day::LENGTH_IN_SECONDS;

    /// Create one of the eight ordinary seasons of `year`.
    pub fn new(season_of_year: i64, year: u64) -> Result<Self, ReckoningError> {
        let max = Self::NAMES.len() as u8;
        if season_of_year < 1 || season_of_year > max as i64 {
            return Err(ReckoningError::InvalidSeason {
                season: season_of_year,
                max,
            });
        }
        Ok(Self::ordinary(season_of_year as u8, year))
    }

    pub(crate) fn ordinary(season_of_year: u8, year: u64) -> Self {
        Self {
            season_of_year,
            year,
            kind: SeasonKind::Ordinary,
            days: OnceLock::new(),
        }
    }

    pub fn season_of_year(&self) -> u8 {
        self.season_of_year
    }

    pub fn year(&self) -> u64 {
        self.year
    }

    pub fn kind(&self) -> SeasonKind {
        self.kind
    }

    pub fn is_festival(&self) -> bool {
        self.kind == SeasonKind::Festival
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            SeasonKind::Ordinary => Self::NAMES[(self.season_of_year - 1) as usize],
            SeasonKind::Festival => FestivalOfTheHunt::NAME,
        }
    }

    pub fn length_in_days(&self) -> u8 {
        match self.kind {
            SeasonKind::Ordinary => Self::LENGTH_IN_DAYS,
            SeasonKind::Festival => FestivalOfTheHunt::LENGTH_IN_DAYS,
        }
    }

    pub fn length_in_spans(&self) -> u8 {
        match self.kind {
            SeasonKind::Ordinary => Self::LENGTH_IN_SPANS,
            SeasonKind::Festival => FestivalOfTheHunt::LENGTH_IN_SPANS,
        }
    }

    pub fn length_in_seconds(&self) -> i64 {
        self.length_in_days() as i64 * Day::LENGTH_IN_SECONDS
    }

    /// Every day of the season, in order.
    pub fn days(&self) -> &[Day] {
        self.days.get_or_init(|| {
            (1..=self.length_in_days())
                .map(|day_of_season| Day {
                    day_of_season,
                    kind: self.kind,
                })
                .collect()
        })
    }

    pub fn day(&self, day_of_season: i64) -> Result<Day, ReckoningError> {
        Day::new(day_of_season, self)
    }
}

impl DateUnit for Season {
    fn number(&self) -> i64 {
        self.season_of_year as i64
    }

    // The festival follows eight full seasons, so its offset is measured
    // in ordinary season lengths.
    fn as_seconds(&self) -> i64 {
        (self.number() - 1) * Self::LENGTH_IN_SECONDS
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SeasonKind::Ordinary => write!(f, "Season of the {}", self.name()),
            SeasonKind::Festival => f.write_str(self.name()),
        }
    }
}

/// The ninth season: five festival days closing every year.
pub struct FestivalOfTheHunt;

impl FestivalOfTheHunt {
    pub const NAME: &'static str = "Festival of the Hunt";
    pub const SEASON_OF_YEAR: u8 = 9;
    pub const DAY_NAMES: [&'static str; 5] = [
        "Syf's Hunt",
        "Mimir's Hunt",
        "Woden's Hunt",
        "Thorus's Hunt",
        "Freya's Hunt",
    ];
    pub const LENGTH_IN_SPANS: u8 = 1;
    pub const LENGTH_IN_DAYS: u8 = Self::LENGTH_IN_SPANS * Span::LENGTH_IN_DAYS;
    pub const LENGTH_IN_SECONDS: i64 = Self::LENGTH_IN_DAYS as i64 * Day::LENGTH_IN_SECONDS;

    #[allow(clippy::new_ret_no_self)]
    pub fn new(year: u64) -> Season {
        Season {
            season_of_year: Self::SEASON_OF_YEAR,
            year,
            kind: SeasonKind::Festival,
            days: OnceLock::new(),
        }
    }
}

/// A year of an era: eight seasons followed by the Festival of the Hunt.
#[derive(Debug, Clone)]
pub struct Year {
    year: u64,
    era: Era,
    seasons: Vec<Season>,
}

impl Year {
    pub const LENGTH_IN_SEASONS: u8 = Season::NAMES.len() as u8;
    pub const LENGTH_IN_SPANS: u16 =
        Self::LENGTH_IN_SEASONS as u16 * Season::LENGTH_IN_SPANS as u16
            + FestivalOfTheHunt::LENGTH_IN_SPANS as u16;
    pub const LENGTH_IN_DAYS: u16 = Self::LENGTH_IN_SPANS * Span::LENGTH_IN_DAYS as u16;
    pub const LENGTH_IN_SECONDS: i64 = Self::LENGTH_IN_DAYS as i64 * Day::LENGTH_IN_SECONDS;

    pub fn new(year: i64, era: Era) -> Result<Self, ReckoningError> {
        let last = era.last_year();
        if year < 1 || year as u64 > last {
            return Err(ReckoningError::InvalidYear {
                year,
                era: era.long(),
                last,
            });
        }
        Ok(Self::within(year as u64, era))
    }

    pub(crate) fn within(year: u64, era: Era) -> Self {
        let mut seasons: Vec<Season> = (1..=Self::LENGTH_IN_SEASONS)
            .map(|season_of_year| Season::ordinary(season_of_year, year))
            .collect();
        seasons.push(FestivalOfTheHunt::new(year));
        Self { year, era, seasons }
    }

    pub fn year(&self) -> u64 {
        self.year
    }

    pub fn era(&self) -> Era {
        self.era
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn season(&self, season_of_year: i64) -> Result<&Season, ReckoningError> {
        usize::try_from(season_of_year - 1)
            .ok()
            .and_then(|index| self.seasons.get(index))
            .ok_or(ReckoningError::MissingSeason {
                season: season_of_year,
                year: self.year,
            })
    }
}

impl DateUnit for Year {
    fn number(&self) -> i64 {
        self.year as i64
    }

    fn as_seconds(&self) -> i64 {
        (self.number() - 1) * Self::LENGTH_IN_SECONDS
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// An age of years. Year numbering restarts at 1 in every era.
#[derive(Debug, Clone, Copy, Hash)]
pub struct Era {
    era: u8,
}

impl Era {
    pub const LONG_NAMES: [&'static str; 3] = ["Ancient Era", "Old Era", "Modern Era"];
    pub const SHORT_NAMES: [&'static str; 3] = ["AE", "OE", "ME"];
    /// Length of each era in years; the last era never ends.
    pub const YEARS: [Option<u64>; 3] = [Some(20_000), Some(10_000), None];

    pub fn new(era: i64) -> Result<Self, ReckoningError> {
        let max = Self::YEARS.len() as u8;
        if era < 1 || era > max as i64 {
            return Err(ReckoningError::InvalidEra { era, max });
        }
        Ok(Self { era: era as u8 })
    }

    pub(crate) fn first() -> Self {
        Self { era: 1 }
    }

    pub fn era(&self) -> u8 {
        self.era
    }

    pub fn short(&self) -> &'static str {
        Self::SHORT_NAMES[self.index()]
    }

    pub fn long(&self) -> &'static str {
        Self::LONG_NAMES[self.index()]
    }

    /// Last year of the era, if it has one.
    pub fn end(&self) -> Option<u64> {
        Self::YEARS[self.index()]
    }

    /// This era's own length in seconds; `None` for the open-ended era.
    pub fn duration_in_seconds(&self) -> Option<i64> {
        self.end().map(|years| years as i64 * Year::LENGTH_IN_SECONDS)
    }

    /// Total seconds of every era before this one.
    pub fn cumulative_offset(&self) -> i64 {
        Self::YEARS[..self.index()]
            .iter()
            .flatten()
            .map(|years| *years as i64 * Year::LENGTH_IN_SECONDS)
            .sum()
    }

    /// Highest valid year number. The open-ended era is bounded only by
    /// what an absolute offset in `i64` seconds can hold.
    pub fn last_year(&self) -> u64 {
        self.end().unwrap_or_else(|| {
            ((i64::MAX - self.cumulative_offset()) / Year::LENGTH_IN_SECONDS) as u64
        })
    }

    fn index(&self) -> usize {
        (self.era - 1) as usize
    }
}

impl DateUnit for Era {
    fn number(&self) -> i64 {
        self.era as i64
    }

    fn as_seconds(&self) -> i64 {
        self.cumulative_offset()
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long())
    }
}
