// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several layers:
//
//   metrics.rs — per-epoch training metrics, logged through
//                tracing and optionally appended to a CSV
//                file for later analysis.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Training metrics record and CSV logger
pub mod metrics;
