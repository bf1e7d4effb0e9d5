// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads the labelled SMS corpus from a delimited file using the
// `csv` crate.
//
// Each row carries two fields:
//   - a text field   (the raw message)
//   - a label field  (0 = ham, 1 = spam)
//
// Column resolution:
//   - with a header row: columns are looked up by name
//     (default "sms" and "label")
//   - without a header row: column 0 is the text, column 1
//     the label
//
// Rows are yielded in file order. The first read or parse
// failure aborts the whole load.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs::File, io::Read, path::PathBuf};

use crate::domain::error::{PipelineError, Result};
use crate::domain::record::{Label, SmsRecord};
use crate::domain::traits::RecordSource;

/// Column defaults matching the SMS spam corpus header.
pub const DEFAULT_TEXT_COLUMN:  &str = "sms";
pub const DEFAULT_LABEL_COLUMN: &str = "label";

/// Loads labelled rows from a CSV file.
/// Implements the RecordSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path:         PathBuf,
    has_headers:  bool,
    text_column:  String,
    label_column: String,
}

impl CsvLoader {
    /// Create a loader for `path` expecting a header row with the
    /// default column names.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:         path.into(),
            has_headers:  true,
            text_column:  DEFAULT_TEXT_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }

    /// Whether the first row is a header to skip.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Override the header names used to find the two fields.
    pub fn with_columns(
        mut self,
        text_column:  impl Into<String>,
        label_column: impl Into<String>,
    ) -> Self {
        self.text_column  = text_column.into();
        self.label_column = label_column.into();
        self
    }

    /// Parse records from any reader. Split out from `load_all`
    /// so the parsing rules are testable without touching disk.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<SmsRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(reader);

        let (text_idx, label_idx) = if self.has_headers {
            let headers = rdr.headers()?.clone();
            let find = |name: &str| {
                headers
                    .iter()
                    .position(|h| h.trim() == name)
                    .ok_or_else(|| {
                        PipelineError::Ingestion(format!(
                            "column '{}' not found in header {:?}",
                            name,
                            headers.iter().collect::<Vec<_>>()
                        ))
                    })
            };
            (find(&self.text_column)?, find(&self.label_column)?)
        } else {
            (0, 1)
        };

        let mut records = Vec::new();

        for (i, row) in rdr.records().enumerate() {
            // 1-based data row number, not counting the header
            let row_no = i + 1;
            let row    = row?;

            if row.iter().all(|field| field.trim().is_empty()) {
                tracing::warn!("row {row_no}: blank, skipped");
                continue;
            }

            let text = row.get(text_idx).ok_or_else(|| {
                PipelineError::Ingestion(format!("row {row_no}: missing text field"))
            })?;
            let raw_label = row.get(label_idx).ok_or_else(|| {
                PipelineError::Ingestion(format!("row {row_no}: missing label field"))
            })?;

            let value: i64 = raw_label.trim().parse().map_err(|_| {
                PipelineError::Ingestion(format!(
                    "row {row_no}: label '{raw_label}' is not an integer"
                ))
            })?;
            let label = Label::try_from(value).map_err(|e| {
                PipelineError::Ingestion(format!("row {row_no}: {e}"))
            })?;

            records.push(SmsRecord::new(text, label));
        }

        tracing::debug!("Parsed {} rows", records.len());
        Ok(records)
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<SmsRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::Ingestion(format!("cannot open '{}': {e}", self.path.display()))
        })?;

        let records = self.read_from(file)?;
        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_rows_by_header_name() {
        let data   = "label,sms\n1,Free entry now\n0,See you later\n";
        let loader = CsvLoader::new("unused.csv");
        let recs   = loader.read_from(data.as_bytes()).unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], SmsRecord::new("Free entry now", Label::Spam));
        assert_eq!(recs[1], SmsRecord::new("See you later", Label::Ham));
    }

    #[test]
    fn test_reads_positional_columns_without_header() {
        let data   = "\"hello, friend\",0\nwin cash,1\n";
        let loader = CsvLoader::new("unused.csv").with_headers(false);
        let recs   = loader.read_from(data.as_bytes()).unwrap();

        assert_eq!(recs[0].text, "hello, friend");
        assert_eq!(recs[1].label, Label::Spam);
    }

    #[test]
    fn test_custom_column_names() {
        let data   = "message,class\nhi,0\n";
        let loader = CsvLoader::new("unused.csv").with_columns("message", "class");
        let recs   = loader.read_from(data.as_bytes()).unwrap();
        assert_eq!(recs, vec![SmsRecord::new("hi", Label::Ham)]);
    }

    #[test]
    fn test_missing_column_is_ingestion_error() {
        let data   = "text,label\nhi,0\n";
        let loader = CsvLoader::new("unused.csv");
        let err    = loader.read_from(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::Ingestion(_)));
    }

    #[test]
    fn test_bad_label_names_the_row() {
        let data   = "sms,label\nok,0\nbad,spam\n";
        let loader = CsvLoader::new("unused.csv");
        let err    = loader.read_from(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_out_of_range_label_is_rejected() {
        let data   = "sms,label\nhm,3\n";
        let loader = CsvLoader::new("unused.csv");
        assert!(loader.read_from(data.as_bytes()).is_err());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let data   = "sms,label\nhi,0\n , \nyo,1\n";
        let loader = CsvLoader::new("unused.csv");
        let recs   = loader.read_from(data.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].text, "yo");
    }

    #[test]
    fn test_load_all_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sms,label").unwrap();
        writeln!(file, "Call now to claim,1").unwrap();
        writeln!(file, "ok lar,0").unwrap();

        let loader = CsvLoader::new(file.path());
        let recs   = loader.load_all().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].label, Label::Spam);
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let loader = CsvLoader::new("/definitely/not/here.csv");
        let err    = loader.load_all().unwrap_err();
        assert!(matches!(err, PipelineError::Ingestion(_)));
    }
}
