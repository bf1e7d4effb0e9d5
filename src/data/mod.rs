// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw corpus file to tensor batches.
//
//   corpus.csv
//       │
//       ▼
//   CsvLoader            → rows of {text, label}
//       │
//       ▼
//   WhitespaceTokenizer  → lowercase tokens per document
//       │
//       ▼
//   VocabularyBuilder    → bounded token → index map (+ <UNK>)
//       │
//       ▼
//   SequenceEncoder      → vocabulary indices per document
//       │
//       ▼
//   SequenceFitter       → exactly L positions per document
//       │
//       ▼
//   TensorAssembler      → (N, L) features + (N, 1) labels
//       │
//       ▼
//   SmsDataset / SmsBatcher → Burn mini-batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the labelled corpus from CSV
pub mod loader;

/// Lowercase whitespace tokenizer
pub mod tokenizer;

/// Bounded vocabulary with an out-of-vocabulary token
pub mod vocabulary;

/// Token → index mapping per document
pub mod encoder;

/// Fixed-length padding and truncation
pub mod padder;

/// Whole-batch feature and label assembly
pub mod assembler;

/// Fitted tokenize → encode → pad → assemble path
pub mod vectorizer;

/// Implements Burn's Dataset trait for assembled documents
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded train/validation split
pub mod splitter;
