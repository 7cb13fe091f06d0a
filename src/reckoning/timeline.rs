/// Campaign timeline: a record of named events and when they happened.
///
/// Event descriptions are stored title-cased ("Start Of The Campaign"), so
/// lookups ignore the case the description was written in. On disk a
/// timeline is a RON map from description to `(date: seconds, redacted:
/// bool)`. Older files mapping descriptions straight to seconds still load.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::datetime::DateTime;
use super::error::ReckoningError;
use super::parser::{EventLookup, Parser};

/// Shown in the public listing in place of a redacted description.
pub const REDACTED: &str = "REDACTED";

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error(transparent)]
    Reckoning(#[from] ReckoningError),
    #[error("no event '{0}' on the timeline")]
    UnknownEvent(String),
    #[error("event '{0}' appears more than once")]
    DuplicateEvent(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),
}

/// When an event happened, and whether players may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub date: DateTime,
    #[serde(default)]
    pub redacted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: FxHashMap<String, Event>,
    now: Option<DateTime>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative expressions are resolved against `now` instead of the
    /// campaign's today.
    pub fn with_now(mut self, now: DateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Load a timeline from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Timeline, TimelineError> {
        let contents = std::fs::read_to_string(path)?;
        let timeline = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), events = timeline.len(), "loaded timeline");
        Ok(timeline)
    }

    /// Parse a timeline from a RON string. Two descriptions that differ
    /// only in case name the same event and are rejected.
    pub fn parse_ron(input: &str) -> Result<Timeline, TimelineError> {
        let raw: Vec<(String, Event)> = match ron::from_str::<BTreeMap<String, Event>>(input) {
            Ok(events) => events.into_iter().collect(),
            Err(e) => match ron::from_str::<BTreeMap<String, DateTime>>(input) {
                Ok(dates) => {
                    tracing::debug!("reading timeline of plain seconds");
                    dates
                        .into_iter()
                        .map(|(description, date)| {
                            let event = Event {
                                date,
                                redacted: false,
                            };
                            (description, event)
                        })
                        .collect()
                }
                Err(_) => return Err(e.into()),
            },
        };

        let mut events = FxHashMap::default();
        for (description, event) in raw {
            let key = title_case(&description);
            if events.insert(key.clone(), event).is_some() {
                return Err(TimelineError::DuplicateEvent(key));
            }
        }
        Ok(Timeline { events, now: None })
    }

    pub fn to_ron(&self) -> Result<String, TimelineError> {
        let sorted: BTreeMap<&str, &Event> = self
            .events
            .iter()
            .map(|(description, event)| (description.as_str(), event))
            .collect();
        Ok(ron::ser::to_string_pretty(
            &sorted,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn save_to_ron(&self, path: &Path) -> Result<(), TimelineError> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!(path = %path.display(), events = self.len(), "saved timeline");
        Ok(())
    }

    /// Record an event at the date an expression resolves to. The
    /// expression may refer to events already on the timeline.
    pub fn record(
        &mut self,
        description: &str,
        expression: &str,
    ) -> Result<&DateTime, TimelineError> {
        self.record_event(description, expression, false)
    }

    /// Record an event kept out of the public listing.
    pub fn record_redacted(
        &mut self,
        description: &str,
        expression: &str,
    ) -> Result<&DateTime, TimelineError> {
        self.record_event(description, expression, true)
    }

    fn record_event(
        &mut self,
        description: &str,
        expression: &str,
        redacted: bool,
    ) -> Result<&DateTime, TimelineError> {
        let date = {
            let mut parser = Parser::new().with_timeline(&*self);
            if let Some(now) = &self.now {
                parser = parser.with_now(now);
            }
            parser.parse(expression)?
        };
        Ok(self.insert_event(description, Event { date, redacted }))
    }

    /// Record an event at a known date.
    pub fn insert(&mut self, description: &str, date: DateTime) -> &DateTime {
        self.insert_event(
            description,
            Event {
                date,
                redacted: false,
            },
        )
    }

    pub fn insert_event(&mut self, description: &str, event: Event) -> &DateTime {
        let key = title_case(description);
        tracing::info!(
            event = %key,
            date = %event.date.numeric(),
            redacted = event.redacted,
            "recorded event"
        );
        self.events.insert(key.clone(), event);
        &self.events[&key].date
    }

    /// Remove all record of an event.
    pub fn expunge(&mut self, description: &str) -> Result<DateTime, TimelineError> {
        let key = title_case(description);
        let event = self
            .events
            .remove(&key)
            .ok_or_else(|| TimelineError::UnknownEvent(key.clone()))?;
        tracing::info!(event = %key, "expunged event");
        Ok(event.date)
    }

    pub fn get(&self, description: &str) -> Option<&DateTime> {
        self.get_event(description).map(|event| &event.date)
    }

    pub fn get_event(&self, description: &str) -> Option<&Event> {
        self.events.get(&title_case(description))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in chronological order.
    pub fn events(&self) -> Vec<(&str, &Event)> {
        let mut events: Vec<(&str, &Event)> = self
            .events
            .iter()
            .map(|(description, event)| (description.as_str(), event))
            .collect();
        events.sort_by(|a, b| a.1.date.cmp(&b.1.date).then_with(|| a.0.cmp(b.0)));
        events
    }

    /// One line per event, oldest first: `3.3206.8.12 M12B  Description`.
    pub fn list(&self) -> Vec<String> {
        self.lines(false)
    }

    /// Like [`Timeline::list`], with redacted descriptions replaced by
    /// [`REDACTED`].
    pub fn public_list(&self) -> Vec<String> {
        self.lines(true)
    }

    fn lines(&self, public: bool) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|(description, event)| {
                let description = if public && event.redacted {
                    REDACTED
                } else {
                    description
                };
                format!(
                    "{} {}  {}",
                    event.date.numeric_date(),
                    event.date.date_tag(),
                    description
                )
            })
            .collect()
    }
}

impl EventLookup for Timeline {
    fn event(&self, description: &str) -> Option<DateTime> {
        self.get(description).cloned()
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("start of the campaign"), "Start Of The Campaign");
        assert_eq!(title_case("TPK on 2.4839.7.23"), "Tpk On 2.4839.7.23");
        assert_eq!(title_case("o'neil's return"), "O'Neil'S Return");
    }

    #[test]
    fn record_and_lookup_ignore_case() {
        let mut timeline = Timeline::new();
        timeline
            .record("Start of the campaign", "on 2.4839.7.22")
            .unwrap();
        let start = timeline.get("START OF THE CAMPAIGN").unwrap();
        assert_eq!(start.numeric_date(), "2.4839.7.22");
        assert!(timeline.event("start of the campaign").is_some());
    }

    #[test]
    fn record_relative_to_event() {
        let mut timeline = Timeline::new();
        timeline
            .record("Start of the campaign", "on 2.4839.7.22")
            .unwrap();
        let reign = timeline
            .record(
                "BBEG starts reign of destruction",
                "50 years before start of the campaign",
            )
            .unwrap();
        assert_eq!(reign.numeric_date(), "2.4789.7.22");
    }

    #[test]
    fn record_uses_timeline_now() {
        let now = DateTime::date(1, 5, 1, 10).unwrap();
        let mut timeline = Timeline::new().with_now(now);
        let date = timeline.record("Market day", "2 days ago").unwrap();
        assert_eq!(date.numeric_date(), "1.5.1.08");
    }

    #[test]
    fn expunge_unknown_event() {
        let mut timeline = Timeline::new();
        assert!(matches!(
            timeline.expunge("nothing happened"),
            Err(TimelineError::UnknownEvent(name)) if name == "Nothing Happened"
        ));
    }

    #[test]
    fn list_is_chronological() {
        let mut timeline = Timeline::new();
        timeline.insert("later", DateTime::date(3, 2, 1, 1).unwrap());
        timeline.insert("earlier", DateTime::date(1, 2, 1, 1).unwrap());
        assert_eq!(
            timeline.list(),
            vec![
                "1.2.1.01 S1F  Earlier".to_string(),
                "3.2.1.01 S1F  Later".to_string(),
            ]
        );
    }

    #[test]
    fn ron_round_trip_keeps_seconds() {
        let mut timeline = Timeline::new();
        timeline.insert("start", DateTime::new(1, 1, 1, 1, 1, 3, 57).unwrap());
        let text = timeline.to_ron().unwrap();
        assert!(text.contains("3837"));
        let back = Timeline::parse_ron(&text).unwrap();
        assert_eq!(back.get("start").unwrap().as_seconds(), 3837);
    }

    #[test]
    fn redacted_events_are_masked_in_public() {
        let mut timeline = Timeline::new();
        timeline.insert("start", DateTime::date(2, 4839, 7, 22).unwrap());
        timeline
            .record_redacted("the lich wakes", "1 day after start")
            .unwrap();
        assert!(timeline.get_event("The Lich Wakes").unwrap().redacted);
        assert_eq!(timeline.list()[1], "2.4839.7.23 W23R  The Lich Wakes");
        assert_eq!(timeline.public_list()[1], "2.4839.7.23 W23R  REDACTED");
        assert_eq!(timeline.public_list()[0], timeline.list()[0]);
    }

    #[test]
    fn redaction_survives_ron() {
        let mut timeline = Timeline::new();
        timeline.record_redacted("secret", "on 1.1.1.2").unwrap();
        let back = Timeline::parse_ron(&timeline.to_ron().unwrap()).unwrap();
        assert_eq!(
            back.get_event("secret"),
            Some(&Event {
                date: DateTime::from_seconds(86_400).unwrap(),
                redacted: true,
            })
        );
    }

    #[test]
    fn plain_seconds_files_still_load() {
        let timeline = Timeline::parse_ron(r#"{"start": 86400}"#).unwrap();
        let event = timeline.get_event("Start").unwrap();
        assert_eq!(event.date.as_seconds(), 86_400);
        assert!(!event.redacted);

        let timeline = Timeline::parse_ron(r#"{"start": (date: 0)}"#).unwrap();
        assert!(!timeline.get_event("start").unwrap().redacted);
    }

    #[test]
    fn descriptions_differing_in_case_collide() {
        let result = Timeline::parse_ron(
            r#"{"start of the campaign": 0, "Start Of The Campaign": 86400}"#,
        );
        assert!(matches!(
            result,
            Err(TimelineError::DuplicateEvent(name)) if name == "Start Of The Campaign"
        ));
    }
}
