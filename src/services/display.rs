use serde_json::{Map, Value};

use crate::models::TICKET_FIELDS;
use crate::types::{DisplayField, ExtractionResponse, FieldValue};

/// Flatten `response.ticket_data` into display fields, in table order.
///
/// Only curated keys are emitted; absent, empty and zero values are dropped.
pub fn normalize(response: &ExtractionResponse) -> Vec<DisplayField> {
    TICKET_FIELDS
        .iter()
        .filter_map(|spec| {
            let value = (spec.read)(&response.ticket_data)?;
            if value.is_blank() {
                return None;
            }
            Some(DisplayField {
                key: spec.key,
                label: spec.label,
                value,
                kind: spec.kind,
                editable: true,
            })
        })
        .collect()
}

/// Replace the value of an editable field. Returns false if `key` is not present or not editable.
pub fn apply_edit(fields: &mut [DisplayField], key: &str, value: FieldValue) -> bool {
    match fields.iter_mut().find(|f| f.key == key && f.editable) {
        Some(field) => {
            field.value = value;
            true
        }
        None => false,
    }
}

/// Collapse display fields back into a `key -> value` record for saving.
pub fn to_record(fields: &[DisplayField]) -> Map<String, Value> {
    fields
        .iter()
        .map(|f| {
            let value = match &f.value {
                FieldValue::Text(s) => Value::from(s.as_str()),
                FieldValue::Number(n) => Value::from(*n),
            };
            (f.key.to_string(), value)
        })
        .collect()
}
