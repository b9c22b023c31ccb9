use humane_core::{merge_habits, parse_snapshot, HabitData, Snapshot};
use serde_json::{json, Value};

fn merge_document() -> Value {
    json!({
        "version": 1,
        "habits": [
            { "id": "tgu", "name": "TGU", "category": "fitness", "targetPerWeek": 3 },
            { "id": "tgu-l", "name": "TGU-L", "category": "fitness", "targetPerWeek": 2 },
            { "id": "tgu-r", "name": "TGU-R", "category": "fitness", "targetPerWeek": 2 },
            { "id": "kb", "name": "Kettlebell", "category": "fitness", "targetPerWeek": 5 }
        ],
        "entries": [
            { "id": "e1", "habitId": "tgu", "date": "2025-11-28", "value": 5,
              "createdAt": "2025-11-28T10:00:00Z" },
            { "id": "e2", "habitId": "tgu", "date": "2025-11-27", "value": 3,
              "createdAt": "2025-11-27T10:00:00Z" },
            { "id": "e3", "habitId": "tgu-l", "date": "2025-11-28", "value": 8,
              "createdAt": "2025-11-28T11:00:00Z" },
            { "id": "e4", "habitId": "tgu-l", "date": "2025-11-26", "value": 4,
              "createdAt": "2025-11-26T10:00:00Z" },
            { "id": "e5", "habitId": "tgu-r", "date": "2025-11-28", "value": 6,
              "createdAt": "2025-11-28T12:00:00Z" },
            { "id": "e6", "habitId": "tgu-r", "date": "2025-11-25", "value": 7,
              "createdAt": "2025-11-25T10:00:00Z" },
            { "id": "e7", "habitId": "kb", "date": "2025-11-28", "value": 10,
              "createdAt": "2025-11-28T09:00:00Z" }
        ]
    })
}

fn merge_snapshot() -> Snapshot {
    Snapshot::from_value(merge_document()).unwrap()
}

fn habit_ids(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.habits.iter().map(|habit| habit.id.as_str()).collect()
}

#[test]
fn merge_takes_max_value_on_same_day() {
    let merged = merge_habits(&merge_snapshot(), "tgu", ["tgu-l", "tgu-r"]);
    let nov28 = merged
        .entries
        .iter()
        .find(|entry| entry.belongs_to("tgu") && entry.date() == "2025-11-28")
        .unwrap();
    assert_eq!(nov28.value_f64(), 8.0);
    assert_eq!(nov28.id, "e3");
    assert_eq!(nov28.created_at(), "2025-11-28T11:00:00Z");
}

#[test]
fn merge_keeps_unique_dates_in_first_occurrence_order() {
    let merged = merge_habits(&merge_snapshot(), "tgu", ["tgu-l", "tgu-r"]);
    let dates: Vec<&str> = merged
        .entries
        .iter()
        .filter(|entry| entry.belongs_to("tgu"))
        .map(|entry| entry.date())
        .collect();
    assert_eq!(
        dates,
        vec!["2025-11-28", "2025-11-27", "2025-11-26", "2025-11-25"]
    );
}

#[test]
fn merge_removes_source_habits_and_keeps_target_unchanged() {
    let source = merge_snapshot();
    let merged = merge_habits(&source, "tgu", ["tgu-l", "tgu-r"]);
    assert_eq!(habit_ids(&merged), vec!["tgu", "kb"]);
    assert_eq!(merged.habits[0], source.habits[0]);
    assert_eq!(merged.habits[0].target_per_week(), 3);
}

#[test]
fn merge_preserves_unrelated_entries_first() {
    let source = merge_snapshot();
    let merged = merge_habits(&source, "tgu", ["tgu-l", "tgu-r"]);
    assert_eq!(merged.entries[0], source.entries[6]);
    let kb: Vec<_> = merged.entries.iter().filter(|e| e.belongs_to("kb")).collect();
    assert_eq!(kb.len(), 1);
    assert_eq!(kb[0].value_f64(), 10.0);
}

#[test]
fn merge_with_target_in_sources_ignores_target() {
    let merged = merge_habits(&merge_snapshot(), "tgu", ["tgu", "tgu-l"]);
    assert_eq!(habit_ids(&merged), vec!["tgu", "tgu-r", "kb"]);
    let tgu_r: Vec<&str> = merged
        .entries
        .iter()
        .filter(|entry| entry.belongs_to("tgu-r"))
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(tgu_r, vec!["e5", "e6"]);
}

#[test]
fn merge_reassigns_every_source_entry() {
    let merged = merge_habits(&merge_snapshot(), "tgu", ["tgu-l", "tgu-r"]);
    assert!(merged
        .entries
        .iter()
        .all(|entry| !entry.belongs_to("tgu-l") && !entry.belongs_to("tgu-r")));
    assert_eq!(merged.entries.len(), 5);
}

#[test]
fn merge_normalizes_date_times_to_days() {
    let snapshot = Snapshot::from_value(json!({
        "habits": [{ "id": "a" }, { "id": "b" }],
        "entries": [
            { "id": "x", "habitId": "a", "date": "2025-11-28T06:00:00Z", "value": 1 },
            { "id": "y", "habitId": "b", "date": "2025-11-28T21:00:00Z", "value": 2 }
        ]
    }))
    .unwrap();
    let merged = merge_habits(&snapshot, "a", ["b"]);
    assert_eq!(merged.entries.len(), 1);
    assert_eq!(merged.entries[0].date(), "2025-11-28");
    assert_eq!(merged.entries[0].id, "y");
}

#[test]
fn merge_into_unknown_target_still_reassigns() {
    let merged = merge_habits(&merge_snapshot(), "ghost", ["tgu-l"]);
    assert_eq!(habit_ids(&merged), vec!["tgu", "tgu-r", "kb"]);
    assert_eq!(
        merged.entries.iter().filter(|e| e.belongs_to("ghost")).count(),
        2
    );
}

#[test]
fn merge_leaves_input_untouched_and_keeps_passthrough_fields() {
    let source = merge_snapshot();
    let before = source.clone();
    let merged = merge_habits(&source, "tgu", ["tgu-l", "tgu-r"]);
    assert_eq!(source, before);

    let value = merged.to_value().unwrap();
    assert_eq!(value["version"], json!(1));
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["version", "habits", "entries"]);
}

#[test]
fn habit_data_merge_matches_free_function() {
    let data = HabitData::new(merge_snapshot());
    let via_service = data.merge("tgu", vec!["tgu-l".to_string()]);
    let direct = merge_habits(data.snapshot(), "tgu", ["tgu-l"]);
    assert_eq!(via_service, direct);

    let reloaded = HabitData::new(via_service);
    assert_eq!(reloaded.entry_count("tgu"), 3);
}

#[test]
fn merge_keeps_unknown_fields_of_untouched_entries() {
    let kept = r#"{"id":"keep","habitId":"c","value":null,"note":"felt great","tags":["x"]}"#;
    let merged_away = r#"{"id":"e1","habitId":"b","date":"2025-01-01","value":1}"#;
    let document = format!(
        r#"{{"habits":[{{"id":"a"}},{{"id":"b"}},{{"id":"c"}}],"entries":[{kept},{merged_away}]}}"#
    );
    let snapshot = parse_snapshot(&document).unwrap();

    let merged = merge_habits(&snapshot, "a", ["b"]);
    assert_eq!(merged.entries[0].id, "keep");
    assert_eq!(serde_json::to_string(&merged.entries[0]).unwrap(), kept);
}
