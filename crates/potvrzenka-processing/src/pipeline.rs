//! The composed upload-to-archive pipeline.

use crate::archive::build_archive;
use crate::error::ProcessingError;
use crate::extractor::{columns, extract_records};
use crate::renderer::{derive_filename, ConfirmationRenderer};
use chrono::NaiveDate;
use potvrzenka_core::TemplateAssets;

/// Result of one processing run.
#[derive(Debug)]
pub struct ConfirmationBatch {
    /// The assembled ZIP archive.
    pub archive: Vec<u8>,
    /// Number of confirmations inside it.
    pub document_count: usize,
}

/// Run the full pipeline over one uploaded bank export.
///
/// One linear pass: extract and filter records, render one PDF per
/// accepted record, assemble the ZIP. The sequence number in each
/// filename counts accepted records only, and the date segment is taken
/// from the raw posting-date value before sentinel substitution.
///
/// Any render failure aborts the whole run; a partial archive is never
/// returned.
pub fn generate_confirmations(
    raw: &[u8],
    assets: &TemplateAssets,
    issue_date: NaiveDate,
) -> Result<ConfirmationBatch, ProcessingError> {
    let renderer = ConfirmationRenderer::new(assets);
    let mut documents: Vec<(String, Vec<u8>)> = Vec::new();

    for (index, record) in extract_records(raw).enumerate() {
        let sequence = index + 1;
        let filename = derive_filename(sequence, record.raw(columns::DATUM_ZAUCTOVANI));
        let line = record.source_line();

        let record = record.normalized();
        let pdf = renderer
            .render(&record, issue_date)
            .map_err(|source| ProcessingError::Render { line, source })?;

        tracing::debug!(
            sequence,
            line,
            filename = %filename,
            bytes = pdf.len(),
            "Rendered confirmation"
        );
        documents.push((filename, pdf));
    }

    let document_count = documents.len();
    let archive = build_archive(&documents).map_err(ProcessingError::Archive)?;

    tracing::info!(document_count, archive_bytes = archive.len(), "Assembled archive");
    Ok(ConfirmationBatch {
        archive,
        document_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use potvrzenka_core::{FontSource, TemplateAssets};
    use std::io::Cursor;

    fn utf16(text: &str) -> Vec<u8> {
        let mut out = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    fn test_assets() -> TemplateAssets {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            4,
            image::Rgb([20, 20, 90]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();

        TemplateAssets {
            letterhead: "Tělocvičná jednota Sokol Brno – Jundrov".to_string(),
            signature: buf.into_inner(),
            font: FontSource::Builtin,
        }
    }

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn entry_names(archive: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(archive.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    const HEADER: &str = "Datum zaúčtování,Částka,Měna,Zpráva pro příjemce,Variabilní symbol";

    #[test]
    fn single_accepted_row_yields_one_named_entry() {
        let csv = format!("{}\n01.03.2024,100,CZK,Jan Novák fotbal,123456", HEADER);
        let batch = generate_confirmations(&utf16(&csv), &test_assets(), issue_date()).unwrap();
        assert_eq!(batch.document_count, 1);
        assert_eq!(entry_names(&batch.archive), vec!["row1_01-03-2024.pdf"]);
    }

    #[test]
    fn negative_rows_do_not_consume_sequence_numbers() {
        let csv = format!(
            "{}\n01.03.2024,-50,CZK,odchozí,111\n02.03.2024,100,CZK,příchozí,222\n03.03.2024,200,CZK,další,333",
            HEADER
        );
        let batch = generate_confirmations(&utf16(&csv), &test_assets(), issue_date()).unwrap();
        assert_eq!(batch.document_count, 2);
        assert_eq!(
            entry_names(&batch.archive),
            vec!["row1_02-03-2024.pdf", "row2_03-03-2024.pdf"]
        );
    }

    #[test]
    fn missing_posting_date_yields_empty_date_segment() {
        let csv = "Částka,Měna\n100,CZK";
        let batch = generate_confirmations(&utf16(csv), &test_assets(), issue_date()).unwrap();
        assert_eq!(entry_names(&batch.archive), vec!["row1_.pdf"]);
    }

    #[test]
    fn header_only_input_yields_valid_empty_archive() {
        let batch = generate_confirmations(&utf16(HEADER), &test_assets(), issue_date()).unwrap();
        assert_eq!(batch.document_count, 0);
        assert_eq!(entry_names(&batch.archive).len(), 0);
    }

    #[test]
    fn filenames_use_raw_date_not_sentinel() {
        // Empty posting date: the body renders the sentinel, the filename
        // keeps the empty segment.
        let csv = format!("{}\n,100,CZK,a,1", HEADER);
        let batch = generate_confirmations(&utf16(&csv), &test_assets(), issue_date()).unwrap();
        assert_eq!(entry_names(&batch.archive), vec!["row1_.pdf"]);
    }

    #[test]
    fn render_failure_aborts_whole_batch_with_line() {
        let assets = TemplateAssets {
            signature: vec![0xDE, 0xAD],
            ..test_assets()
        };
        let csv = format!("{}\n01.03.2024,100,CZK,a,1", HEADER);
        let err = generate_confirmations(&utf16(&csv), &assets, issue_date()).unwrap_err();
        assert!(err.to_string().contains("CSV line 2"));
    }

    #[test]
    fn entries_are_real_pdfs() {
        use std::io::Read;
        let csv = format!("{}\n01.03.2024,100,CZK,a,1", HEADER);
        let batch = generate_confirmations(&utf16(&csv), &test_assets(), issue_date()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(batch.archive)).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert!(content.starts_with(b"%PDF"));
    }
}
