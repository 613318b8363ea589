//! Configuration module
//!
//! Environment-driven configuration for the service, loaded once at
//! startup. Template resource paths live here so the renderer never does
//! ambient filesystem lookups.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
const DEFAULT_LETTERHEAD_PATH: &str = "nastaveni/hlavicka.txt";
const DEFAULT_SIGNATURE_PATH: &str = "nastaveni/podpis.jpg";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size_bytes: usize,
    /// Plain-text letterhead printed at the top of every confirmation.
    pub letterhead_path: String,
    /// Signature image stamped into the footer.
    pub signature_path: String,
    /// Optional TTF embedded into the PDFs. Built-in Helvetica when unset;
    /// Czech diacritics need an embedded font (e.g. DejaVu Sans).
    pub pdf_font_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            letterhead_path: env::var("LETTERHEAD_PATH")
                .unwrap_or_else(|_| DEFAULT_LETTERHEAD_PATH.to_string()),
            signature_path: env::var("SIGNATURE_PATH")
                .unwrap_or_else(|_| DEFAULT_SIGNATURE_PATH.to_string()),
            pdf_font_path: env::var("PDF_FONT_PATH").ok().filter(|p| !p.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_MB must be greater than zero");
        }
        if self.letterhead_path.is_empty() {
            anyhow::bail!("LETTERHEAD_PATH must not be empty");
        }
        if self.signature_path.is_empty() {
            anyhow::bail!("SIGNATURE_PATH must not be empty");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 8080,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            max_upload_size_bytes: 10 * 1024 * 1024,
            letterhead_path: DEFAULT_LETTERHEAD_PATH.to_string(),
            signature_path: DEFAULT_SIGNATURE_PATH.to_string(),
            pdf_font_path: None,
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_upload_limit() {
        let mut config = base_config();
        config.max_upload_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_asset_paths() {
        let mut config = base_config();
        config.letterhead_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_detection_is_case_insensitive() {
        let mut config = base_config();
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "development".to_string();
        assert!(!config.is_production());
    }
}
