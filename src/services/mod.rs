pub mod display;
pub mod ticket_extraction;

pub use display::{apply_edit, normalize, to_record};
pub use ticket_extraction::TicketExtractionClient;
