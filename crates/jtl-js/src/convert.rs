//! Element record <-> script value conversion.
//!
//! Records become tables with the same keys in the same order; `children`
//! is always a list of tables. The conversion adds and drops nothing, so a
//! record survives a round trip unchanged. Going back, `Nil` and function
//! fields are dropped and non-table list items are skipped.

use jtl_dom::{AttrValue, ElementRecord, keys};

use crate::value::ScriptValue;

/// Convert a record into a table.
#[must_use]
pub fn record_to_value(record: &ElementRecord) -> ScriptValue {
    ScriptValue::Table(
        record
            .iter()
            .map(|(key, value)| {
                let converted = match (key, value) {
                    (keys::CHILDREN, AttrValue::Record(child)) => {
                        ScriptValue::List(vec![record_to_value(child)])
                    }
                    _ => attr_to_value(value),
                };
                (key.to_string(), converted)
            })
            .collect(),
    )
}

fn attr_to_value(value: &AttrValue) -> ScriptValue {
    match value {
        AttrValue::Bool(b) => ScriptValue::Bool(*b),
        AttrValue::Number(n) => ScriptValue::Number(*n),
        AttrValue::Str(s) => ScriptValue::String(s.clone()),
        AttrValue::List(items) => ScriptValue::List(items.iter().map(record_to_value).collect()),
        AttrValue::Record(record) => record_to_value(record),
    }
}

/// Convert a table back into a record. Returns `None` for anything that is
/// not a table.
#[must_use]
pub fn value_to_record(value: &ScriptValue) -> Option<ElementRecord> {
    let ScriptValue::Table(entries) = value else {
        return None;
    };
    let mut record = ElementRecord::new();
    for (key, value) in entries {
        let converted = match value {
            ScriptValue::Nil | ScriptValue::Function(_) => continue,
            ScriptValue::Bool(b) => AttrValue::Bool(*b),
            ScriptValue::Number(n) => AttrValue::Number(*n),
            ScriptValue::String(s) => AttrValue::Str(s.clone()),
            ScriptValue::List(items) => {
                AttrValue::List(items.iter().filter_map(value_to_record).collect())
            }
            ScriptValue::Table(_) => match value_to_record(value) {
                Some(child) if key == keys::CHILDREN => AttrValue::List(vec![child]),
                Some(child) => AttrValue::Record(child),
                None => continue,
            },
        };
        let _ = record.set(key, converted);
    }
    Some(record)
}

/// Convert a list of tables into records, skipping non-tables. A single table
/// is treated as a one-element list.
#[must_use]
pub fn value_to_records(value: &ScriptValue) -> Vec<ElementRecord> {
    match value {
        ScriptValue::List(items) => items.iter().filter_map(value_to_record).collect(),
        ScriptValue::Table(_) => value_to_record(value).into_iter().collect(),
        _ => Vec::new(),
    }
}
