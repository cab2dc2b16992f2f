pub mod ticket_fields;

pub use ticket_fields::{FieldKind, FieldSpec, TICKET_FIELDS};
