//! Test helpers: build the router around in-memory template assets.
//!
//! Run from workspace root: `cargo test -p potvrzenka-api`.

use axum::Router;
use potvrzenka_api::setup::routes;
use potvrzenka_api::state::AppState;
use potvrzenka_core::{Config, FontSource, TemplateAssets};
use std::io::Cursor;
use std::sync::Arc;

/// Encode text the way the bank exports it: UTF-16LE with BOM.
pub fn utf16(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Minimal valid JPEG standing in for the signature scan.
pub fn test_signature_jpeg() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        4,
        image::Rgb([25, 25, 100]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
    buf.into_inner()
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        max_upload_size_bytes: 10 * 1024 * 1024,
        letterhead_path: "nastaveni/hlavicka.txt".to_string(),
        signature_path: "nastaveni/podpis.jpg".to_string(),
        pdf_font_path: None,
    }
}

pub fn test_router() -> Router {
    let config = test_config();
    let assets = TemplateAssets {
        letterhead: "Tělocvičná jednota Sokol Brno – Jundrov\nJasanová 3, Brno".to_string(),
        signature: test_signature_jpeg(),
        font: FontSource::Builtin,
    };
    let state = Arc::new(AppState {
        config: config.clone(),
        assets: Arc::new(assets),
    });
    routes::setup_routes(&config, state).unwrap()
}

/// Hand-rolled multipart body with a single file field.
pub fn multipart_body(boundary: &str, field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
