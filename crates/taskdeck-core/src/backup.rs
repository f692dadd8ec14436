//! Portable JSON backup of the task collection.
//!
//! A backup is a pretty-printed JSON array of task objects with camelCase
//! keys. Decoding only checks the outer shape; field repair is left to
//! [`normalize_records`](crate::normalize::normalize_records).

use crate::error::{CoreError, ParseError};
use crate::normalize::normalize_records;
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Decoded but not yet validated task records, in backup order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCollection(Vec<Value>);

impl RawCollection {
    pub fn records(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `tasks` encode back to exactly these records, i.e. loading
    /// them changed nothing that needs writing back.
    pub fn is_encoding_of(&self, tasks: &[Task]) -> bool {
        match serde_json::to_value(tasks) {
            Ok(Value::Array(encoded)) => encoded == self.0,
            _ => false,
        }
    }

    /// Repair every record into a [`Task`], sorted by `order`.
    pub fn normalize(&self, now: DateTime<Utc>) -> Vec<Task> {
        normalize_records(&self.0, now)
    }
}

/// Encode every task, preserving collection order.
pub fn serialize(tasks: &[Task]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Decode backup text into raw records.
///
/// Fails when `text` is not JSON or its top-level value is not an array.
pub fn deserialize(text: &str) -> Result<RawCollection, ParseError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => Ok(RawCollection(records)),
        other => Err(ParseError::NotASequence(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::NaiveDate;

    fn sample() -> Vec<Task> {
        let mut first = Task::new("Pay bills", Priority::High, None, 0.0, Utc::now()).unwrap();
        first.completed = true;
        let second = Task::new(
            "Renew passport",
            Priority::Low,
            NaiveDate::from_ymd_opt(2025, 6, 30),
            1.5,
            Utc::now(),
        )
        .unwrap();
        vec![first, second]
    }

    #[test]
    fn restores_identical_tasks() {
        let tasks = sample();
        let text = serialize(&tasks).unwrap();
        let raw = deserialize(&text).unwrap();
        assert_eq!(raw.normalize(Utc::now()), tasks);
        assert!(raw.is_encoding_of(&tasks));

        let direct: Vec<Task> = serde_json::from_str(&text).unwrap();
        assert_eq!(direct, tasks);
    }

    #[test]
    fn repaired_records_differ_from_their_encoding() {
        let raw = deserialize(r#"[{"text": "no id", "order": 0}]"#).unwrap();
        let tasks = raw.normalize(Utc::now());
        assert!(!raw.is_encoding_of(&tasks));
        assert_eq!(raw.records()[0]["text"], "no id");

        let empty = deserialize("[]").unwrap();
        assert!(empty.is_encoding_of(&[]));
    }

    #[test]
    fn uses_camel_case_keys() {
        let text = serialize(&sample()).unwrap();
        assert!(text.contains("\"createdAt\""));
        assert!(text.contains("\"dueDate\": null"));
        assert!(text.contains("\"dueDate\": \"2025-06-30\""));
        assert!(text.contains("\"priority\": \"high\""));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(deserialize("[{"), Err(ParseError::Syntax(_))));
        assert!(matches!(deserialize(""), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn rejects_non_array() {
        let err = deserialize(r#"{"text": "x"}"#).unwrap_err();
        assert!(matches!(err, ParseError::NotASequence("an object")));
        assert!(err.to_string().contains("list of task records"));
    }

    #[test]
    fn accepts_records_it_cannot_use() {
        let raw = deserialize(r#"[1, "two", {"text": "three"}]"#).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.normalize(Utc::now()).len(), 1);
    }

    #[test]
    fn reads_legacy_widget_backup() {
        let text = r#"[
          {"id": "lx2k9a1f3", "text": "Call mom", "completed": false,
           "createdAt": "2024-05-01T10:00:00.000Z", "priority": "medium",
           "dueDate": "", "order": 1714557600000}
        ]"#;
        let tasks = deserialize(text).unwrap().normalize(Utc::now());
        assert_eq!(tasks[0].id.as_str(), "lx2k9a1f3");
        assert!(tasks[0].due_date.is_none());
    }
}
