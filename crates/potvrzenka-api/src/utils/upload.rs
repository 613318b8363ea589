//! Common utilities for the file upload handler

use axum::extract::Multipart;
use potvrzenka_core::AppError;

/// Form field name the upload form posts the CSV under.
pub const CSV_FIELD_NAME: &str = "csv_file";

/// Extract file data and filename from the multipart form.
/// Only one field named "csv_file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_csv(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == CSV_FIELD_NAME {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Multiple file fields are not allowed; send exactly one field named '{}'",
                    CSV_FIELD_NAME
                )));
            }
            filename = field.file_name().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))?;
    let filename = filename.unwrap_or_else(|| "upload.csv".to_string());

    Ok((file_data, filename))
}

/// Validate file size against the configured cap.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_file_size_accepts_at_limit() {
        assert!(validate_file_size(1024, 1024).is_ok());
    }

    #[test]
    fn validate_file_size_rejects_over_limit() {
        let err = validate_file_size(2 * 1024 * 1024, 1024 * 1024).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
