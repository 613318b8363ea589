//! ZIP assembly of rendered confirmation documents.

use anyhow::{Context, Result};
use std::io::Write;

/// Download name offered to the client for the assembled archive.
pub const ARCHIVE_DOWNLOAD_NAME: &str = "pdf_confirmations.zip";

/// Create a ZIP archive from rendered documents.
///
/// Each (filename, bytes) pair becomes one deflate-compressed entry named
/// exactly by its filename, no directory prefix. Zero documents produce a
/// valid empty archive.
pub fn build_archive(documents: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (filename, data) in documents {
            zip.start_file(filename.as_str(), options)
                .with_context(|| format!("Failed to add file to ZIP: {}", filename))?;
            zip.write_all(data)
                .with_context(|| format!("Failed to write file data to ZIP: {}", filename))?;
        }

        zip.finish().context("Failed to finalize ZIP archive")?;
    }

    Ok(buffer)
}
