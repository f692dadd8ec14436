//! Coerce loosely-typed task records into valid [`Task`]s.
//!
//! Records come from backups or from the persisted collection and may be
//! missing fields, carry the wrong JSON types, or predate the current model.
//! Each record is repaired field by field; only records with no usable text
//! are dropped.

use crate::task::{Priority, Task, TaskId, MAX_TEXT_LEN};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Normalize a whole raw collection and sort it by `order`.
///
/// `now` stands in for any missing `createdAt`. Records without `order`
/// take their position in `records`. The sort is stable, so equal keys keep
/// their relative input order.
pub fn normalize_records(records: &[Value], now: DateTime<Utc>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut tasks: Vec<Task> = records
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| normalize_record(raw, position, now, &mut seen))
        .collect();
    tasks.sort_by(|a, b| a.order.total_cmp(&b.order));
    tasks
}

fn normalize_record(
    raw: &Value,
    position: usize,
    now: DateTime<Utc>,
    seen: &mut HashSet<TaskId>,
) -> Option<Task> {
    let Some(fields) = raw.as_object() else {
        tracing::warn!(position, "skipping task record that is not an object");
        return None;
    };

    let Some(text) = text_field(fields) else {
        tracing::warn!(position, "skipping task record with empty text");
        return None;
    };

    let mut id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => TaskId::from_string(s.clone()),
        _ => TaskId::new(),
    };
    if seen.contains(&id) {
        tracing::warn!(position, id = id.as_str(), "duplicate task id, assigning a fresh one");
        id = TaskId::new();
    }
    seen.insert(id.clone());

    Some(Task {
        id,
        text,
        completed: fields.get("completed").is_some_and(truthy),
        created_at: fields
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map_or(now, |dt| dt.with_timezone(&Utc)),
        priority: fields
            .get("priority")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Priority>().ok())
            .unwrap_or_default(),
        due_date: fields
            .get("dueDate")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()),
        order: fields
            .get("order")
            .and_then(Value::as_f64)
            .filter(|o| o.is_finite())
            .unwrap_or(position as f64),
    })
}

/// Extract, trim, and cap the text field. `None` when nothing usable remains.
fn text_field(fields: &Map<String, Value>) -> Option<String> {
    let raw = match fields.get("text")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        tracing::warn!(max = MAX_TEXT_LEN, "truncating over-long task text");
        let cut: String = trimmed.chars().take(MAX_TEXT_LEN).collect();
        return Some(cut.trim_end().to_string());
    }
    Some(trimmed.to_string())
}

/// Loose truthiness: zero, empty strings, and null are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
