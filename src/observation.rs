// src/observation.rs
//
// Policy-facing observation: the snapshot handed back by reset/step.
//
// Serializable and order-deterministic so two runs with the same seed and
// action sequence can be compared structurally.

use serde::{Deserialize, Serialize};

use crate::types::Embedding;

/// What the policy sees: the active user's embedding and the embeddings of
/// the currently visible items, in position order. The policy's next
/// action indexes into `item_embeddings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub user_embedding: Embedding,
    pub item_embeddings: Vec<Embedding>,
}

impl Observation {
    /// Number of currently visible items (the valid action positions are
    /// `0..n_visible()`).
    pub fn n_visible(&self) -> usize {
        self.item_embeddings.len()
    }
}
