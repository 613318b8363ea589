//! Bank-export processing pipeline: CSV record extraction, PDF
//! confirmation rendering, and ZIP archive assembly.
//!
//! The pipeline is a single linear pass, one upload at a time:
//!
//! 1. **extractor** – UTF-16 bytes → filtered [`FieldRecord`] iterator
//! 2. **renderer** – one record → one fixed-layout PDF page
//! 3. **archive** – (filename, bytes) pairs → one ZIP buffer
//!
//! [`pipeline::generate_confirmations`] composes the three stages.

pub mod archive;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod renderer;

pub use error::{ProcessingError, RenderError};
pub use extractor::{columns, extract_records, FieldRecord, NOT_SPECIFIED};
pub use pipeline::{generate_confirmations, ConfirmationBatch};
pub use renderer::{derive_filename, ConfirmationRenderer};
