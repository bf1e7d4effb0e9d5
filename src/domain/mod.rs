// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the classifier.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// One labelled SMS row and its label
pub mod record;

// The spam/ham verdict and the threshold rule that produces it
pub mod verdict;

// The error taxonomy shared by every stage of the pipeline
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
