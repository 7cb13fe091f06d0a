/// Timeline persistence and lookup integration tests.

use std::path::Path;
use telisar::reckoning::{DateTime, Parser, Timeline, TimelineError};

fn fixture() -> Timeline {
    Timeline::load_from_ron(Path::new("tests/fixtures/timeline.ron")).unwrap()
}

#[test]
fn fixture_loads() {
    let timeline = fixture();
    assert_eq!(timeline.len(), 4);
    assert_eq!(
        timeline.get("Start of the Campaign").unwrap().numeric_date(),
        "2.4839.7.22"
    );
    assert_eq!(
        timeline.get("festival feast").unwrap().numeric(),
        "3.3206.9.01.18.00.00"
    );
}

#[test]
fn fixture_lists_oldest_first() {
    let lines = fixture().list();
    assert_eq!(
        lines,
        vec![
            "2.4789.7.22 M22R  Bbeg Starts Reign Of Destruction".to_string(),
            "2.4839.7.22 M22R  Start Of The Campaign".to_string(),
            "3.3206.8.12 M12B  The Party Reaches Tamar".to_string(),
            "3.3206.9.01 S1H  Festival Feast".to_string(),
        ]
    );
}

#[test]
fn expressions_resolve_against_fixture_events() {
    let timeline = fixture();
    let parser = Parser::new().with_timeline(&timeline);
    let date = parser.parse("1 span after the party reaches tamar").unwrap();
    assert_eq!(date.numeric_date(), "3.3206.8.17");
}

#[test]
fn save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.ron");

    let mut timeline = Timeline::new().with_now(DateTime::from_numeric("3.3206.8.12").unwrap());
    timeline.record("Dragon sighted", "3 days ago").unwrap();
    timeline.record("Dragon slain", "2 days after dragon sighted").unwrap();
    timeline.save_to_ron(&path).unwrap();

    let reloaded = Timeline::load_from_ron(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(
        reloaded.get("dragon slain").unwrap().numeric_date(),
        "3.3206.8.11"
    );
    assert_eq!(
        reloaded.get("Dragon Sighted"),
        timeline.get("dragon sighted")
    );
}

#[test]
fn expunge_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.ron");

    let mut timeline = fixture();
    let removed = timeline.expunge("festival feast").unwrap();
    assert_eq!(removed.numeric_date(), "3.3206.9.01");
    assert!(matches!(
        timeline.expunge("festival feast"),
        Err(TimelineError::UnknownEvent(_))
    ));
    timeline.save_to_ron(&path).unwrap();
    assert_eq!(Timeline::load_from_ron(&path).unwrap().len(), 3);
}

#[test]
fn bad_files() {
    assert!(matches!(
        Timeline::load_from_ron(Path::new("tests/fixtures/missing.ron")),
        Err(TimelineError::Io(_))
    ));
    assert!(matches!(
        Timeline::parse_ron("{ \"before time\": -5 }"),
        Err(TimelineError::Ron(_))
    ));
    assert!(matches!(
        Timeline::parse_ron("not a map"),
        Err(TimelineError::Ron(_))
    ));
}

#[test]
fn unparseable_record_leaves_timeline_unchanged() {
    let mut timeline = fixture();
    assert!(matches!(
        timeline.record("Nothing", "sometime soon"),
        Err(TimelineError::Reckoning(_))
    ));
    assert_eq!(timeline.len(), 4);
}

#[test]
fn redacted_events_stay_hidden_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.ron");

    let mut timeline = fixture();
    timeline
        .record_redacted("The lich stirs", "1 day before the party reaches tamar")
        .unwrap();
    timeline.save_to_ron(&path).unwrap();

    let reloaded = Timeline::load_from_ron(&path).unwrap();
    assert_eq!(reloaded.len(), 5);
    assert_eq!(
        reloaded.list()[2],
        "3.3206.8.11 S11B  The Lich Stirs".to_string()
    );
    assert_eq!(
        reloaded.public_list(),
        vec![
            "2.4789.7.22 M22R  Bbeg Starts Reign Of Destruction".to_string(),
            "2.4839.7.22 M22R  Start Of The Campaign".to_string(),
            "3.3206.8.11 S11B  REDACTED".to_string(),
            "3.3206.8.12 M12B  The Party Reaches Tamar".to_string(),
            "3.3206.9.01 S1H  Festival Feast".to_string(),
        ]
    );
    assert!(!reloaded.get_event("festival feast").unwrap().redacted);
}

#[test]
fn case_variants_of_one_description_are_rejected() {
    let result = Timeline::parse_ron(
        r#"{"start of the campaign": 0, "Start Of The Campaign": 86400}"#,
    );
    assert!(matches!(result, Err(TimelineError::DuplicateEvent(_))));
}
