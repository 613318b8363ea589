//! Application state shared by all handlers.

use potvrzenka_core::{Config, TemplateAssets};
use std::sync::Arc;

/// Immutable per-process state: configuration and the template resources
/// loaded at startup. Requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub assets: Arc<TemplateAssets>,
}
