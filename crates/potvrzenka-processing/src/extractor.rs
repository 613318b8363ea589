//! Record extraction from raw bank-export bytes.
//!
//! The bank exports statements as UTF-16 CSV with a header row. Decoding
//! is lossy (undecodable sequences become U+FFFD) and row anomalies are
//! tolerated, so a damaged export still yields every readable row.

use encoding_rs::UTF_16LE;
use std::collections::HashMap;
use std::io::Cursor;

/// Sentinel substituted for empty field values before rendering.
pub const NOT_SPECIFIED: &str = "neuvedeno";

/// Column names of the bank-export schema. These are literal wire-format
/// keys, so the Czech originals are kept verbatim.
pub mod columns {
    pub const DATUM_ZAUCTOVANI: &str = "Datum zaúčtování";
    pub const NAZEV_PROTIUCTU: &str = "Název protiúčtu";
    pub const IBAN: &str = "IBAN";
    pub const BIC: &str = "BIC";
    pub const PROTIUCET: &str = "Protiúčet";
    pub const BANKOVNI_KOD_PROTIUCTU: &str = "Bankovní kód protiúčtu";
    pub const ZPRAVA_PRO_PRIJEMCE: &str = "Zpráva pro příjemce";
    pub const CASTKA: &str = "Částka";
    pub const MENA: &str = "Měna";
    pub const VARIABILNI_SYMBOL: &str = "Variabilní symbol";

    pub const ALL: [&str; 10] = [
        DATUM_ZAUCTOVANI,
        NAZEV_PROTIUCTU,
        IBAN,
        BIC,
        PROTIUCET,
        BANKOVNI_KOD_PROTIUCTU,
        ZPRAVA_PRO_PRIJEMCE,
        CASTKA,
        MENA,
        VARIABILNI_SYMBOL,
    ];
}

/// One data row of the export, keyed by header column names.
///
/// Values are kept raw as parsed; [`FieldRecord::normalized`] substitutes
/// the sentinel for empty values before rendering. Filenames are derived
/// from the raw values, so normalization is a separate, explicit step.
#[derive(Debug, Clone)]
pub struct FieldRecord {
    source_line: u64,
    fields: HashMap<String, String>,
}

impl FieldRecord {
    /// 1-based line in the original CSV where this row started
    /// (the header is line 1).
    pub fn source_line(&self) -> u64 {
        self.source_line
    }

    /// Raw parsed value, `None` when the column is absent from this row.
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value for rendering; absent columns contribute the sentinel.
    pub fn field(&self, column: &str) -> &str {
        self.fields
            .get(column)
            .map(String::as_str)
            .unwrap_or(NOT_SPECIFIED)
    }

    /// Replace empty values with the sentinel. Consumes the record so the
    /// raw and normalized views cannot be confused.
    pub fn normalized(mut self) -> Self {
        for value in self.fields.values_mut() {
            if value.is_empty() {
                *value = NOT_SPECIFIED.to_string();
            }
        }
        self
    }

    #[cfg(test)]
    pub(crate) fn for_tests(fields: &[(&str, &str)]) -> Self {
        FieldRecord {
            source_line: 2,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Lazy, finite, non-restartable sequence of accepted records.
pub struct Records {
    headers: csv::StringRecord,
    inner: Option<csv::StringRecordsIntoIter<Cursor<Vec<u8>>>>,
}

impl Iterator for Records {
    type Item = FieldRecord;

    fn next(&mut self) -> Option<FieldRecord> {
        loop {
            let result = self.inner.as_mut()?.next()?;
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable CSV row");
                    continue;
                }
            };

            let source_line = record.position().map(|p| p.line()).unwrap_or(0);

            // Dict-style row mapping: cells zip against the header, extra
            // cells are dropped, missing trailing columns stay absent.
            let mut fields = HashMap::with_capacity(self.headers.len());
            for (name, value) in self.headers.iter().zip(record.iter()) {
                fields.insert(name.to_string(), value.to_string());
            }

            // A leading '-' on the raw amount marks an outgoing payment.
            // Textual prefix check on purpose: locale-formatted amounts
            // must not go through numeric parsing.
            if fields
                .get(columns::CASTKA)
                .map(|amount| amount.starts_with('-'))
                .unwrap_or(false)
            {
                tracing::debug!(line = source_line, "Dropping row with negative amount");
                continue;
            }

            return Some(FieldRecord {
                source_line,
                fields,
            });
        }
    }
}

/// Decode and parse raw upload bytes into accepted records.
///
/// The bytes are decoded as UTF-16 (BOM-sniffing, little-endian default,
/// lossy) and parsed as comma-delimited CSV with the first line as the
/// header. Rows whose amount starts with `-` are dropped. Never fails:
/// unreadable input simply yields fewer records.
pub fn extract_records(raw: &[u8]) -> Records {
    let (decoded, _, had_errors) = UTF_16LE.decode(raw);
    if had_errors {
        tracing::warn!("Replaced undecodable byte sequences in uploaded CSV");
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(Cursor::new(decoded.into_owned().into_bytes()));

    match reader.headers() {
        Ok(headers) => {
            let headers = headers.clone();
            Records {
                headers,
                inner: Some(reader.into_records()),
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not read CSV header row");
            Records {
                headers: csv::StringRecord::new(),
                inner: None,
            }
        }
    }
}
