//! Template assets: the read-only resources every rendered confirmation
//! shares. Loaded once at process start and passed explicitly into the
//! renderer; requests never touch the filesystem.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;

/// Font used for all text in the rendered documents.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// PDF built-in Helvetica. No embedding, limited glyph coverage.
    Builtin,
    /// Raw TTF bytes embedded into each document.
    Embedded(Vec<u8>),
}

/// Immutable per-process template resources.
#[derive(Clone, Debug)]
pub struct TemplateAssets {
    /// Multi-line letterhead printed at the top of every page.
    pub letterhead: String,
    /// Encoded signature image (JPEG or PNG) stamped into the footer.
    pub signature: Vec<u8>,
    pub font: FontSource,
}

impl TemplateAssets {
    /// Read all template resources from the configured paths.
    /// Fails fast with the offending path in the error chain.
    pub fn load(config: &Config) -> Result<Self> {
        let letterhead = fs::read_to_string(&config.letterhead_path)
            .with_context(|| format!("Failed to read letterhead from {}", config.letterhead_path))?;

        let signature = fs::read(&config.signature_path)
            .with_context(|| format!("Failed to read signature image from {}", config.signature_path))?;

        let font = match &config.pdf_font_path {
            Some(path) => {
                let bytes = fs::read(path)
                    .with_context(|| format!("Failed to read PDF font from {}", path))?;
                FontSource::Embedded(bytes)
            }
            None => FontSource::Builtin,
        };

        tracing::info!(
            letterhead = %config.letterhead_path,
            signature = %config.signature_path,
            embedded_font = config.pdf_font_path.is_some(),
            "Template assets loaded"
        );

        Ok(TemplateAssets {
            letterhead,
            signature,
            font,
        })
    }
}
