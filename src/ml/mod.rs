// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// The differentiable-model collaborator. Besides the Burn
// dataset/batcher in Layer 4, only this layer touches Burn.
//
//   model.rs      — the fixed three-stage classifier:
//                   embedding or flatten → dense(16, relu)
//                   → dense(1, sigmoid)
//
//   trainer.rs    — the training loop: forward pass, binary
//                   cross-entropy, backward pass, Adam step,
//                   per-epoch accuracy
//
//   inferencer.rs — batched prediction with a trained model
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Feed-forward spam classifier architecture
pub mod model;

/// Training loop with optional validation
pub mod trainer;

/// Batched spam probabilities from a trained model
pub mod inferencer;
