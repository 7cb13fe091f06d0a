/// Relative date expressions: "3 days after tomorrow", "on 2.4839.7.22".
///
/// Patterns are tried in order and the first match wins:
///
/// 1. `<value> <unit> <modifier> <start>`, e.g. "50 years before start of
///    the campaign" or "1 day ago"
/// 2. `at <start>` / `on <start>`
///
/// `<start>` resolves, in order, to the parser's `now` when empty, an event
/// of the timeline, a [`NamedInstant`], or a numeric date literal.
use regex::Regex;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::str::FromStr;
use std::sync::OnceLock;

use super::datetime::DateTime;
use super::error::ReckoningError;
use super::units::{Day, Era, Hour, Minute, Season, Span, Year};

/// Modifiers that move the start point forward in time.
pub const FUTURE_MODIFIERS: [&str; 3] = ["from", "after", "later than"];

/// Modifiers that move the start point backward in time.
pub const PAST_MODIFIERS: [&str; 4] = ["before", "ago", "earlier than", "prior to"];

/// The campaign's "today": the 12th of the Bear, 3206 of the Modern Era.
pub const CAMPAIGN_TODAY_SECONDS: i64 = 30_000 * Year::LENGTH_IN_SECONDS
    + 3205 * Year::LENGTH_IN_SECONDS
    + 7 * Season::LENGTH_IN_SECONDS
    + 11 * Day::LENGTH_IN_SECONDS;

/// A source of named events a start expression may refer to.
pub trait EventLookup {
    fn event(&self, description: &str) -> Option<DateTime>;
}

impl<S: BuildHasher> EventLookup for HashMap<String, DateTime, S> {
    fn event(&self, description: &str) -> Option<DateTime> {
        self.get(description).cloned()
    }
}

impl<S: BuildHasher> EventLookup for HashMap<String, i64, S> {
    fn event(&self, description: &str) -> Option<DateTime> {
        self.get(description)
            .and_then(|seconds| DateTime::from_seconds(*seconds).ok())
    }
}

/// Bare words that name an instant relative to the parser's `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedInstant {
    Now,
    Today,
    Yesterday,
    Tomorrow,
}

impl NamedInstant {
    pub const ALL: [NamedInstant; 4] = [
        NamedInstant::Now,
        NamedInstant::Today,
        NamedInstant::Yesterday,
        NamedInstant::Tomorrow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Tomorrow => "tomorrow",
        }
    }

    /// Offset from `now`, in seconds.
    pub fn offset(&self) -> i64 {
        match self {
            Self::Now | Self::Today => 0,
            Self::Yesterday => -Day::LENGTH_IN_SECONDS,
            Self::Tomorrow => Day::LENGTH_IN_SECONDS,
        }
    }

    pub fn lookup(word: &str) -> Option<Self> {
        let word = word.trim();
        Self::ALL
            .into_iter()
            .find(|instant| instant.name().eq_ignore_ascii_case(word))
    }
}

/// Units an offset may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitOfTime {
    Era,
    Year,
    Season,
    Span,
    Day,
    Hour,
    Minute,
}

impl UnitOfTime {
    /// Eras differ in length, so an era offset counts as the shortest
    /// bounded era.
    pub fn length_in_seconds(&self) -> i64 {
        match self {
            Self::Era => {
                let shortest = Era::YEARS.iter().flatten().min().copied().unwrap_or(0);
                shortest as i64 * Year::LENGTH_IN_SECONDS
            }
            Self::Year => Year::LENGTH_IN_SECONDS,
            Self::Season => Season::LENGTH_IN_SECONDS,
            Self::Span => Span::LENGTH_IN_SECONDS,
            Self::Day => Day::LENGTH_IN_SECONDS,
            Self::Hour => Hour::LENGTH_IN_SECONDS,
            Self::Minute => Minute::LENGTH_IN_SECONDS,
        }
    }
}

impl FromStr for UnitOfTime {
    type Err = ReckoningError;

    /// Case-insensitive; singular or plural.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lowered = name.trim().to_lowercase();
        match lowered.trim_end_matches('s') {
            "era" => Ok(Self::Era),
            "year" => Ok(Self::Year),
            "season" => Ok(Self::Season),
            "span" => Ok(Self::Span),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            _ => Err(ReckoningError::Parse(format!(
                "'{name}' is not a unit of time"
            ))),
        }
    }
}

/// How the offset is applied to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    At,
    Future,
    Past,
}

impl FromStr for Modifier {
    type Err = ReckoningError;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        let word = word.trim().to_lowercase();
        if word == "at" || word == "on" {
            Ok(Self::At)
        } else if FUTURE_MODIFIERS.contains(&word.as_str()) {
            Ok(Self::Future)
        } else if PAST_MODIFIERS.contains(&word.as_str()) {
            Ok(Self::Past)
        } else {
            Err(ReckoningError::Parse(format!(
                "could not parse range modifier '{word}'"
            )))
        }
    }
}

/// The named groups captured from an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionMatch {
    pub value: Option<String>,
    pub unit: Option<String>,
    pub modifier: String,
    pub start: String,
}

fn patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let modifiers = FUTURE_MODIFIERS
            .iter()
            .chain(PAST_MODIFIERS.iter())
            .copied()
            .collect::<Vec<_>>()
            .join("|");
        // Both patterns are fixed at compile time.
        [
            Regex::new(&format!(
                r"^\s*(?P<value>\d+)\s*(?P<unit>\w+)\s+(?i:(?P<modifier>{modifiers}))(?:\s+(?P<start>.*?))?\s*$"
            ))
            .expect("offset pattern is valid"),
            Regex::new(r"^\s*(?i:(?P<modifier>at|on))\s+(?P<start>.*?)\s*$")
                .expect("absolute pattern is valid"),
        ]
    })
}

/// Parses relative date expressions against a reference `now` and an
/// optional table of named events.
pub struct Parser<'a> {
    now: i64,
    timeline: Option<&'a dyn EventLookup>,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    /// A parser whose `now` is the campaign's today.
    pub fn new() -> Self {
        Self {
            now: CAMPAIGN_TODAY_SECONDS,
            timeline: None,
        }
    }

    pub fn with_now(mut self, now: &DateTime) -> Self {
        self.now = now.as_seconds();
        self
    }

    pub fn with_timeline(mut self, timeline: &'a dyn EventLookup) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Use the date of a timeline event as `now`.
    pub fn with_now_event(mut self, description: &str) -> Result<Self, ReckoningError> {
        let event = self
            .timeline
            .and_then(|timeline| timeline.event(description))
            .ok_or_else(|| {
                ReckoningError::Parse(format!("no event '{description}' on the timeline"))
            })?;
        self.now = event.as_seconds();
        Ok(self)
    }

    pub fn now(&self) -> Result<DateTime, ReckoningError> {
        DateTime::from_seconds(self.now)
    }

    /// Match an expression against the patterns without resolving it.
    pub fn match_expression(&self, expression: &str) -> Option<ExpressionMatch> {
        patterns().iter().find_map(|pattern| {
            let captures = pattern.captures(expression)?;
            let group = |name: &str| captures.name(name).map(|m| m.as_str().to_string());
            Some(ExpressionMatch {
                value: group("value"),
                unit: group("unit"),
                modifier: group("modifier").unwrap_or_default(),
                start: group("start").unwrap_or_default(),
            })
        })
    }

    /// Parse an expression into a date.
    pub fn parse(&self, expression: &str) -> Result<DateTime, ReckoningError> {
        let matched = self.match_expression(expression).ok_or_else(|| {
            ReckoningError::Parse(format!(
                "could not parse expression '{expression}' using any pattern"
            ))
        })?;
        tracing::debug!(?matched, expression, "matched date expression");
        DateTime::from_seconds(self.calculate(&matched)?)
    }

    fn calculate(&self, matched: &ExpressionMatch) -> Result<i64, ReckoningError> {
        let offset = self.offset(matched)?;
        let start = self.resolve_start(&matched.start)?;
        let overflow =
            || ReckoningError::InvalidDate(format!("offset of {offset} seconds overflows"));

        match matched.modifier.parse::<Modifier>()? {
            Modifier::At => Ok(start),
            Modifier::Past => start.checked_sub(offset).ok_or_else(overflow),
            Modifier::Future => start.checked_add(offset).ok_or_else(overflow),
        }
    }

    fn offset(&self, matched: &ExpressionMatch) -> Result<i64, ReckoningError> {
        let (Some(value), Some(unit)) = (&matched.value, &matched.unit) else {
            return Ok(0);
        };
        let unit = unit.parse::<UnitOfTime>()?;
        let value = value
            .parse::<i64>()
            .map_err(|e| ReckoningError::Parse(format!("bad value '{value}': {e}")))?;
        value
            .checked_mul(unit.length_in_seconds())
            .ok_or_else(|| ReckoningError::Parse(format!("{value} {unit:?}s is too far away")))
    }

    fn resolve_start(&self, start: &str) -> Result<i64, ReckoningError> {
        let start = start.trim();
        if start.is_empty() {
            tracing::debug!(now = self.now, "start resolved to now");
            return Ok(self.now);
        }

        if let Some(event) = self.timeline.and_then(|timeline| timeline.event(start)) {
            tracing::debug!(start, seconds = event.as_seconds(), "start resolved to event");
            return Ok(event.as_seconds());
        }

        if let Some(instant) = NamedInstant::lookup(start) {
            tracing::debug!(start, ?instant, "start resolved to named instant");
            return self.now.checked_add(instant.offset()).ok_or_else(|| {
                ReckoningError::InvalidDate(format!("'{start}' lies beyond the end of time"))
            });
        }

        if start.chars().all(|c| c.is_ascii_digit() || c == '.') {
            let date = DateTime::from_numeric(start)?;
            tracing::debug!(start, seconds = date.as_seconds(), "start resolved to literal");
            return Ok(date.as_seconds());
        }

        Err(ReckoningError::Parse(format!(
            "unable to parse date expression '{start}'"
        )))
    }
}
