//! Parking ticket extraction client.
//!
//! Sends OCR text from a scanned ticket to the extraction backend and turns
//! the structured reply into display-ready fields.
//!
//! ```rust,ignore
//! use ticket_scanner_lib::{ExtractionConfig, TicketExtractionClient};
//!
//! let config = ExtractionConfig::from_env()?;
//! let client = TicketExtractionClient::new(&config)?;
//! for field in client.extract_display_fields(&ocr_text).await? {
//!     println!("{}: {}", field.label, field.value);
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod testing;
pub mod transport;
pub mod types;

pub use config::{default_app_data_dir, ApiKey, ExtractionConfig};
pub use error::{ConfigError, ExtractError, Result, TransportError};
pub use models::{FieldKind, TICKET_FIELDS};
pub use services::{apply_edit, normalize, to_record, TicketExtractionClient};
pub use transport::{select_transport, RuntimeEnvironment, Transport, TransportKind};
pub use types::{DisplayField, ExtractionRequest, ExtractionResponse, FieldValue, TicketData};
