use humane_core::{BackupSource, CategoryStat, HabitData, LoadError};
use serde_json::{json, Value};
use std::collections::HashSet;

fn sample_document() -> Value {
    json!({
        "version": 1,
        "habits": [
            { "id": "habit1", "name": "Morning Run", "category": "fitness", "targetPerWeek": 3 },
            { "id": "habit2", "name": "Meditation", "category": "wellness", "targetPerWeek": 7 },
            { "id": "habit3", "name": "Evening Walk", "category": "fitness", "targetPerWeek": 5 }
        ],
        "entries": [
            { "id": "e1", "habitId": "habit1", "date": "2025-11-28", "value": 1,
              "createdAt": "2025-11-28T10:00:00Z" },
            { "id": "e2", "habitId": "habit1", "date": "2025-11-27", "value": 1,
              "createdAt": "2025-11-27T10:00:00Z" },
            { "id": "e3", "habitId": "habit2", "date": "2025-11-28", "value": 1,
              "createdAt": "2025-11-28T08:00:00Z" }
        ]
    })
}

fn sample_data() -> HabitData {
    HabitData::load(Some(BackupSource::Document(sample_document()))).unwrap()
}

#[test]
fn load_without_source_fails() {
    let err = HabitData::load(None).unwrap_err();
    assert!(matches!(err, LoadError::NoSource));
}

#[test]
fn categories_group_habits_in_document_order() {
    let data = sample_data();
    let groups = data.categories();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "fitness");
    let fitness: Vec<&str> = groups[0].habits.iter().map(|habit| habit.id.as_str()).collect();
    assert_eq!(fitness, vec!["habit1", "habit3"]);
    assert_eq!(groups[1].category, "wellness");
    assert_eq!(groups[1].habits.len(), 1);
}

#[test]
fn habits_in_category_is_exact_and_case_sensitive() {
    let data = sample_data();
    let names: Vec<&str> = data
        .habits_in_category("fitness")
        .into_iter()
        .map(|habit| habit.name())
        .collect();
    assert_eq!(names, vec!["Morning Run", "Evening Walk"]);
    assert!(data.habits_in_category("Fitness").is_empty());
    assert!(data.habits_in_category("nope").is_empty());
}

#[test]
fn category_union_reconstructs_all_habits() {
    let data = sample_data();
    let mut seen = HashSet::new();
    let mut total = 0;
    for group in data.categories() {
        for habit in data.habits_in_category(group.category) {
            seen.insert(habit.id.clone());
            total += 1;
        }
    }
    assert_eq!(total, data.habits().len());
    assert_eq!(seen.len(), data.habits().len());
}

#[test]
fn entries_for_habit_filters_by_habit_id() {
    let data = sample_data();
    assert_eq!(data.entries_for_habit("habit1").len(), 2);
    assert_eq!(data.entries_for_habit("habit2").len(), 1);
    assert!(data.entries_for_habit("habit3").is_empty());
    assert_eq!(data.entry_count("habit1"), 2);
}

#[test]
fn habit_name_falls_back_to_unknown() {
    let data = sample_data();
    assert_eq!(data.habit_name("habit1"), "Morning Run");
    assert_eq!(data.habit_name("nonexistent"), "Unknown");
}

#[test]
fn category_stats_are_sorted_and_sum_targets() {
    let data = sample_data();
    let stats = data.category_stats();
    assert_eq!(
        stats,
        vec![
            CategoryStat::new("fitness", 2, 8),
            CategoryStat::new("wellness", 1, 7),
        ]
    );
    let counted: usize = stats.iter().map(|stat| stat.habit_count).sum();
    assert_eq!(counted, data.habits().len());
}

#[test]
fn category_stats_default_missing_fields() {
    let data = HabitData::load(Some(BackupSource::Document(json!({
        "habits": [
            { "id": "a", "name": "A" },
            { "id": "b", "name": "B", "category": "arts", "targetPerWeek": 2 }
        ],
        "entries": []
    }))))
    .unwrap();
    assert_eq!(
        data.category_stats(),
        vec![
            CategoryStat::new("arts", 1, 2),
            CategoryStat::new("uncategorized", 1, 0),
        ]
    );
}

#[test]
fn find_by_name_is_case_insensitive_substring() {
    let data = HabitData::load(Some(BackupSource::Document(json!({
        "habits": [
            { "id": "tgu", "name": "TGU" },
            { "id": "tgu-l", "name": "TGU-L" },
            { "id": "tgu-r", "name": "TGU-R" },
            { "id": "kb", "name": "Kettlebell" }
        ]
    }))))
    .unwrap();

    let lower: Vec<&str> = data.find_by_name("tgu").into_iter().map(|h| h.id.as_str()).collect();
    let upper: Vec<&str> = data.find_by_name("TGU").into_iter().map(|h| h.id.as_str()).collect();
    assert_eq!(lower, vec!["tgu", "tgu-l", "tgu-r"]);
    assert_eq!(lower, upper);

    let partial = data.find_by_name("-L");
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].name(), "TGU-L");

    assert_eq!(data.find_by_name("kettlebell")[0].id, "kb");
    assert!(data.find_by_name("swim").is_empty());
    assert_eq!(data.find_by_name("").len(), 4);
}

#[test]
fn malformed_optional_fields_fall_back_to_defaults() {
    let data = HabitData::load(Some(BackupSource::Document(json!({
        "habits": [
            { "id": "a", "name": "Stretch", "targetPerWeek": 2.5 },
            { "id": "b", "name": "Read", "category": 7, "targetPerWeek": 4 }
        ],
        "entries": [{ "id": "e1", "habitId": "a", "value": "lots" }]
    }))))
    .unwrap();

    assert_eq!(
        data.category_stats(),
        vec![CategoryStat::new("uncategorized", 2, 4)]
    );
    assert_eq!(data.entries_for_habit("a").len(), 1);
}
