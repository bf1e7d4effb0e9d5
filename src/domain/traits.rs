// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer reads the corpus through this trait
// only, so the CSV reader and the in-memory test corpus are
// interchangeable.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::Result;
use crate::domain::record::SmsRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the labelled corpus.
///
/// Implementations:
///   - CsvLoader     → reads a delimited file row by row
///   - InMemorySource → wraps an already-built Vec (test builds only)
///
/// Records must come back in source order. The whole corpus is
/// consumed before any encoding starts because the vocabulary
/// depends on every token in it.
pub trait RecordSource {
    /// Read every record. Returning `Ok` signals end-of-stream;
    /// any read or parse failure is an `Ingestion` error.
    fn load_all(&self) -> Result<Vec<SmsRecord>>;
}

/// A corpus that already lives in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<SmsRecord>,
}

#[cfg(test)]
impl InMemorySource {
    pub fn new(records: Vec<SmsRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
impl RecordSource for InMemorySource {
    fn load_all(&self) -> Result<Vec<SmsRecord>> {
        Ok(self.records.clone())
    }
}
