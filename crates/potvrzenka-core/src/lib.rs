//! Shared foundation for the potvrzenka service: configuration, template
//! assets, and the unified error model.

pub mod assets;
pub mod config;
pub mod error;

pub use assets::{FontSource, TemplateAssets};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
