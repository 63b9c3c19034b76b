use super::*;

#[test]
fn record_preserves_insertion_order() {
    let record: Record = [("name", Value::from("a")), ("id", Value::from(1))]
        .into_iter()
        .collect();

    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "id"]);
}

#[test]
fn record_insert_replaces_in_place() {
    let mut record = Record::new();
    record.insert("id", 1);
    record.insert("name", "a");

    let previous = record.insert("id", 2);

    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    assert_eq!(record.get("id"), Some(&Value::Int(2)));
    assert_eq!(record.len(), 2);
}

#[test]
fn record_remove_drops_key() {
    let mut record: Record = [("id", 1), ("rank", 7)].into_iter().collect();

    assert_eq!(record.remove("id"), Some(Value::Int(1)));
    assert!(!record.contains_key("id"));
    assert_eq!(record.remove("missing"), None);
}

#[test]
fn value_kind_matches_variant() {
    assert_eq!(Value::from("x").kind(), ValueKind::Text);
    assert_eq!(Value::from(3_u64).kind(), ValueKind::Uint);
    assert_eq!(Value::from(Option::<i64>::None).kind(), ValueKind::Null);
    assert_eq!(Value::from(Record::new()).kind(), ValueKind::Record);
    assert_eq!(ValueKind::Record.to_string(), "record");
}

#[test]
fn value_serializes_through_serde() {
    let record: Record = [("id", Value::from(1)), ("name", Value::from("a"))]
        .into_iter()
        .collect();
    let value = Value::Record(record);

    let json = serde_json::to_string(&value).expect("value should serialize");
    let back: Value = serde_json::from_str(&json).expect("value should deserialize");

    assert_eq!(back, value);
}

#[test]
fn record_deserialize_collapses_repeated_keys() {
    let entries = vec![
        ("id".to_string(), Value::Int(1)),
        ("name".to_string(), Value::from("a")),
        ("id".to_string(), Value::Int(2)),
    ];
    let json = serde_json::to_string(&entries).expect("entries should serialize");

    let record: Record = serde_json::from_str(&json).expect("record should deserialize");

    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    assert_eq!(record.get("id"), Some(&Value::Int(2)));
    assert_eq!(record.len(), 2);
}
