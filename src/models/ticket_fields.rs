use serde::{Deserialize, Serialize};

use crate::types::{FieldValue, TicketData};

/// Display type of a ticket field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Datetime,
}

/// One row of the curated field table: wire key -> label -> kind, plus how to read it.
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub read: fn(&TicketData) -> Option<FieldValue>,
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish()
    }
}

fn text(value: &Option<String>) -> Option<FieldValue> {
    value.clone().map(FieldValue::Text)
}

fn number(value: Option<f64>) -> Option<FieldValue> {
    value.map(FieldValue::Number)
}

/// Ticket fields in display order. Adding a field means adding a row here and a member on `TicketData`.
pub const TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "ticket_category",
        label: "Ticket Category",
        kind: FieldKind::Text,
        read: |t| text(&t.ticket_category),
    },
    FieldSpec {
        key: "pcn_number",
        label: "PCN Number",
        kind: FieldKind::Text,
        read: |t| text(&t.pcn_number),
    },
    FieldSpec {
        key: "car_vrm",
        label: "Vehicle Registration",
        kind: FieldKind::Text,
        read: |t| text(&t.car_vrm),
    },
    FieldSpec {
        key: "contravention_code",
        label: "Contravention Code",
        kind: FieldKind::Text,
        read: |t| text(&t.contravention_code),
    },
    FieldSpec {
        key: "contravention_datetime",
        label: "Date of Contravention",
        kind: FieldKind::Datetime,
        read: |t| text(&t.contravention_datetime),
    },
    FieldSpec {
        key: "date_of_notice",
        label: "Date of Notice",
        kind: FieldKind::Datetime,
        read: |t| text(&t.date_of_notice),
    },
    FieldSpec {
        key: "contravention_code_suffix",
        label: "Code Suffix",
        kind: FieldKind::Text,
        read: |t| text(&t.contravention_code_suffix),
    },
    FieldSpec {
        key: "contravention_description",
        label: "Description",
        kind: FieldKind::Text,
        read: |t| text(&t.contravention_description),
    },
    FieldSpec {
        key: "council",
        label: "Council",
        kind: FieldKind::Text,
        read: |t| text(&t.council),
    },
    FieldSpec {
        key: "location",
        label: "Location",
        kind: FieldKind::Text,
        read: |t| text(&t.location),
    },
    FieldSpec {
        key: "geo_lat",
        label: "Latitude",
        kind: FieldKind::Number,
        read: |t| number(t.geo_lat),
    },
    FieldSpec {
        key: "geo_lng",
        label: "Longitude",
        kind: FieldKind::Number,
        read: |t| number(t.geo_lng),
    },
    FieldSpec {
        key: "ceo_code",
        label: "CEO Code",
        kind: FieldKind::Text,
        read: |t| text(&t.ceo_code),
    },
    FieldSpec {
        key: "observation_period",
        label: "Observation Period",
        kind: FieldKind::Text,
        read: |t| text(&t.observation_period),
    },
    FieldSpec {
        key: "car_make",
        label: "Vehicle Make",
        kind: FieldKind::Text,
        read: |t| text(&t.car_make),
    },
    FieldSpec {
        key: "car_model",
        label: "Vehicle Model",
        kind: FieldKind::Text,
        read: |t| text(&t.car_model),
    },
    FieldSpec {
        key: "car_colour",
        label: "Vehicle Colour",
        kind: FieldKind::Text,
        read: |t| text(&t.car_colour),
    },
];

/// Looks up a field row by its wire key.
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    TICKET_FIELDS.iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_seventeen_unique_keys() {
        let keys: HashSet<_> = TICKET_FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(TICKET_FIELDS.len(), 17);
        assert_eq!(keys.len(), 17);
    }

    #[test]
    fn every_key_is_a_ticket_data_member() {
        // Populate every member, then check each table row reads something back.
        let data: TicketData = serde_json::from_value(serde_json::json!({
            "ticket_category": "a", "pcn_number": "a", "car_vrm": "a",
            "contravention_code": "a", "contravention_datetime": "a",
            "date_of_notice": "a", "contravention_code_suffix": "a",
            "contravention_description": "a", "council": "a", "location": "a",
            "geo_lat": 1.0, "geo_lng": 1.0, "ceo_code": "a",
            "observation_period": "a", "car_make": "a", "car_model": "a",
            "car_colour": "a"
        }))
        .unwrap();
        assert!(data.extra.is_empty());
        for spec in TICKET_FIELDS {
            assert!((spec.read)(&data).is_some(), "{} not read", spec.key);
        }
    }

    #[test]
    fn kinds_match_wire_types() {
        assert_eq!(field_spec("geo_lat").unwrap().kind, FieldKind::Number);
        assert_eq!(field_spec("date_of_notice").unwrap().kind, FieldKind::Datetime);
        assert_eq!(field_spec("pcn_number").unwrap().label, "PCN Number");
        assert!(field_spec("fine_amount").is_none());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FieldKind::Datetime).unwrap(), "\"datetime\"");
    }
}
