/// A complete point in Telisaran time and its arithmetic.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use super::error::ReckoningError;
use super::parser::{EventLookup, Parser};
use super::units::{
    ordinal, DateUnit, Day, Era, FestivalOfTheHunt, Hour, Minute, Season, Second, Year,
};

/// A date and time on the Telisaran calendar.
///
/// Equality, ordering and hashing all go through [`DateTime::as_seconds`],
/// the number of seconds since the beginning of time. That integer is
/// also the serialized form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub struct DateTime {
    era: Era,
    year: Year,
    season: Season,
    day: Day,
    hour: Hour,
    minute: Minute,
    second: Second,
}

impl DateTime {
    /// Build a date from its components.
    ///
    /// Season 9 is the Festival of the Hunt; seasons 1–8 are ordinary.
    /// Hour, minute and second are 0-indexed, everything else 1-indexed.
    pub fn new(
        era: i64,
        year: i64,
        season: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Result<Self, ReckoningError> {
        let era = Era::new(era)?;
        let year = Year::new(year, era)?;
        let season = match season {
            9 => FestivalOfTheHunt::new(year.year()),
            1..=8 => Season::new(season, year.year())?,
            _ => {
                return Err(ReckoningError::InvalidSeason {
                    season,
                    max: FestivalOfTheHunt::SEASON_OF_YEAR,
                })
            }
        };
        let day = Day::new(day, &season)?;
        let hour = Hour::new(hour)?;
        let minute = Minute::new(minute)?;
        let second = Second::new(second)?;

        Ok(Self {
            era,
            year,
            season,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight at the start of the given day.
    pub fn date(era: i64, year: i64, season: i64, day: i64) -> Result<Self, ReckoningError> {
        Self::new(era, year, season, day, 0, 0, 0)
    }

    /// Parse a dotted numeric literal: `era.year.season.day` with an
    /// optional `.hour.minute.second`. Missing trailing fields take their
    /// start-of-time defaults.
    pub fn from_numeric(literal: &str) -> Result<Self, ReckoningError> {
        let fields = literal
            .trim()
            .split('.')
            .map(|field| field.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                ReckoningError::Parse(format!("'{}' is not a numeric date", literal.trim()))
            })?;

        if fields.len() > 7 {
            return Err(ReckoningError::Parse(format!(
                "'{}' has {} fields; a numeric date has at most 7",
                literal.trim(),
                fields.len()
            )));
        }

        let mut parts = [1, 1, 1, 1, 0, 0, 0];
        parts[..fields.len()].copy_from_slice(&fields);
        let [era, year, season, day, hour, minute, second] = parts;
        Self::new(era, year, season, day, hour, minute, second)
    }

    /// Reconstruct the date lying `seconds` after the beginning of time.
    pub fn from_seconds(seconds: i64) -> Result<Self, ReckoningError> {
        if seconds < 0 {
            return Err(ReckoningError::InvalidDate(format!(
                "{seconds} seconds lies before the beginning of time"
            )));
        }

        let mut remaining = seconds;
        let mut era = 1;
        for (index, years) in Era::YEARS.iter().enumerate() {
            era = index as i64 + 1;
            match years {
                Some(years) if remaining >= *years as i64 * Year::LENGTH_IN_SECONDS => {
                    remaining -= *years as i64 * Year::LENGTH_IN_SECONDS;
                }
                _ => break,
            }
        }

        let year = remaining / Year::LENGTH_IN_SECONDS;
        remaining %= Year::LENGTH_IN_SECONDS;
        let last_year = Era::new(era)?.last_year() as i64;
        if year >= last_year {
            return Err(ReckoningError::InvalidDate(format!(
                "{seconds} seconds lies past the last whole year of time"
            )));
        }
        let season = remaining / Season::LENGTH_IN_SECONDS;
        remaining %= Season::LENGTH_IN_SECONDS;
        let day = remaining / Day::LENGTH_IN_SECONDS;
        remaining %= Day::LENGTH_IN_SECONDS;
        let hour = remaining / Hour::LENGTH_IN_SECONDS;
        remaining %= Hour::LENGTH_IN_SECONDS;
        let minute = remaining / Minute::LENGTH_IN_SECONDS;
        let second = remaining % Minute::LENGTH_IN_SECONDS;

        tracing::trace!(
            seconds,
            era,
            year = year + 1,
            season = season + 1,
            day = day + 1,
            hour,
            minute,
            second,
            "decomposed seconds"
        );

        Self::new(era, year + 1, season + 1, day + 1, hour, minute, second)
    }

    /// Parse a relative date expression such as "3 days after tomorrow".
    pub fn from_expression(
        expression: &str,
        now: Option<&DateTime>,
        timeline: Option<&dyn EventLookup>,
    ) -> Result<Self, ReckoningError> {
        let mut parser = Parser::new();
        if let Some(now) = now {
            parser = parser.with_now(now);
        }
        if let Some(timeline) = timeline {
            parser = parser.with_timeline(timeline);
        }
        parser.parse(expression)
    }

    /// Seconds since the beginning of time.
    pub fn as_seconds(&self) -> i64 {
        self.era.as_seconds()
            + self.year.as_seconds()
            + self.season.as_seconds()
            + self.day.as_seconds()
            + self.hour.as_seconds()
            + self.minute.as_seconds()
            + self.second.as_seconds()
    }

    pub fn checked_add(&self, seconds: i64) -> Result<Self, ReckoningError> {
        let total = self.as_seconds().checked_add(seconds).ok_or_else(|| {
            ReckoningError::InvalidDate(format!("{seconds} seconds after {self} overflows"))
        })?;
        Self::from_seconds(total)
    }

    pub fn checked_sub(&self, seconds: i64) -> Result<Self, ReckoningError> {
        let total = self.as_seconds().checked_sub(seconds).ok_or_else(|| {
            ReckoningError::InvalidDate(format!("{seconds} seconds before {self} overflows"))
        })?;
        Self::from_seconds(total)
    }

    pub fn era(&self) -> &Era {
        &self.era
    }

    pub fn year(&self) -> &Year {
        &self.year
    }

    pub fn season(&self) -> &Season {
        &self.season
    }

    pub fn day(&self) -> &Day {
        &self.day
    }

    pub fn hour(&self) -> &Hour {
        &self.hour
    }

    pub fn minute(&self) -> &Minute {
        &self.minute
    }

    pub fn second(&self) -> &Second {
        &self.second
    }

    /// The full prose form, e.g. "Sun's Hour on Mimdag, the 12th day of the
    /// Season of the Bear (the 2nd day of the 3rd span) in the year 3206
    /// of the Modern Era".
    pub fn long(&self) -> String {
        let day = self.day.day_of_season() as i64;
        if self.season.is_festival() {
            format!(
                "{} on {}, the {} day of the {}, in the year {} of the {}",
                self.time_long(),
                self.day.name(),
                ordinal(day),
                self.season,
                self.year,
                self.era.long()
            )
        } else {
            format!(
                "{} on {}, the {} day of the {} (the {} day of the {} span) in the year {} of the {}",
                self.time_long(),
                self.day.name(),
                ordinal(day),
                self.season,
                ordinal(self.day.day_of_span() as i64),
                ordinal(self.day.span().span_of_season() as i64),
                self.year,
                self.era.long()
            )
        }
    }

    /// `era.year.season.day.hour.minute.second`
    pub fn numeric(&self) -> String {
        format!(
            "{}.{:02}.{:02}.{:02}",
            self.numeric_date(),
            self.hour.hour(),
            self.minute.minute(),
            self.second.second()
        )
    }

    /// `era.year.season.day`
    pub fn numeric_date(&self) -> String {
        format!(
            "{}.{}.{}.{:02}",
            self.era.era(),
            self.year.year(),
            self.season.season_of_year(),
            self.day.day_of_season()
        )
    }

    /// Compact tag: day-name initial, day of season, season initial (`H`
    /// for the festival). "M12B" is Mimdag the 12th of the Bear.
    pub fn date_tag(&self) -> String {
        let season = if self.season.is_festival() {
            'H'
        } else {
            initial(self.season.name())
        };
        format!(
            "{}{}{}",
            initial(self.day.name()),
            self.day.day_of_season(),
            season
        )
    }

    /// Named-hour form: "Sun's Hour", "15 past 7th hour".
    pub fn time_long(&self) -> String {
        if self.minute.minute() == 0 {
            self.hour.name()
        } else {
            format!("{} past {}", self.minute, self.hour.name())
        }
    }

    /// `HH:MM:SS`
    pub fn time(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hour.hour(),
            self.minute.minute(),
            self.second.second()
        )
    }

    /// "Mimdag, 12th of the Bear, 3206 ME 12:00:00"
    pub fn short(&self) -> String {
        format!(
            "{}, {} of the {}, {} {} {}",
            self.day.name(),
            ordinal(self.day.day_of_season() as i64),
            self.season.name(),
            self.year,
            self.era.short(),
            self.time()
        )
    }
}

fn initial(name: &str) -> char {
    name.chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

impl Default for DateTime {
    /// The beginning of time: midnight on the first day of the Fox, year
    /// 1 of the Ancient Era.
    fn default() -> Self {
        let era = Era::first();
        let year = Year::within(1, era);
        let season = Season::ordinary(1, 1);
        let day = season.days()[0];
        Self {
            era,
            year,
            season,
            day,
            hour: Hour::default(),
            minute: Minute::default(),
            second: Second::default(),
        }
    }
}

impl DateUnit for DateTime {
    fn number(&self) -> i64 {
        self.as_seconds()
    }

    fn as_seconds(&self) -> i64 {
        DateTime::as_seconds(self)
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.as_seconds() == other.as_seconds()
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_seconds().cmp(&other.as_seconds())
    }
}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_seconds().hash(state);
    }
}

impl Add<i64> for &DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn add(self, seconds: i64) -> Self::Output {
        self.checked_add(seconds)
    }
}

impl Sub<i64> for &DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn sub(self, seconds: i64) -> Self::Output {
        self.checked_sub(seconds)
    }
}

impl Add<i64> for DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn add(self, seconds: i64) -> Self::Output {
        self.checked_add(seconds)
    }
}

impl Sub<i64> for DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn sub(self, seconds: i64) -> Self::Output {
        self.checked_sub(seconds)
    }
}

impl Add for &DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn add(self, other: Self) -> Self::Output {
        self.checked_add(other.as_seconds())
    }
}

impl Sub for &DateTime {
    type Output = Result<DateTime, ReckoningError>;

    fn sub(self, other: Self) -> Self::Output {
        self.checked_sub(other.as_seconds())
    }
}

impl From<DateTime> for i64 {
    fn from(datetime: DateTime) -> Self {
        datetime.as_seconds()
    }
}

impl TryFrom<i64> for DateTime {
    type Error = ReckoningError;

    fn try_from(seconds: i64) -> Result<Self, Self::Error> {
        DateTime::from_seconds(seconds)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Date: era={}, year={}, season={}, day={}, span={}, hour={}, minute={}, second={}>: {}",
            self.era.era(),
            self.year.year(),
            self.season.season_of_year(),
            self.day.day_of_season(),
            self.day.span().span_of_season(),
            self.hour.hour(),
            self.minute.minute(),
            self.second.second(),
            self.short()
        )
    }
}
