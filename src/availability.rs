// src/availability.rs
//
// Availability filter: the per-step view of recommendable items.
//
// Positions are transient. The policy addresses items by their position
// within the currently visible set, which shrinks as items expire, so the
// position -> id mapping is rebuilt from scratch every step and never
// carried across steps. Pure function of (store, t); consults no
// randomness.

use serde::{Deserialize, Serialize};

use crate::store::EntityStore;
use crate::types::{Embedding, ItemId, Timestep};

/// The ordered visible-item view for one time step.
///
/// `pos2id[pos]` maps the dense position a policy uses in its action to the
/// stable item id; `embeddings[pos]` is that item's embedding. Both are in
/// creation order over the item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleItems {
    pub embeddings: Vec<Embedding>,
    pub pos2id: Vec<ItemId>,
}

impl VisibleItems {
    pub fn len(&self) -> usize {
        self.pos2id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos2id.is_empty()
    }
}

/// Compute the items recommendable at time `t` (`t < use_until`) and the
/// dense position -> id bijection over them.
///
/// Returns empty sequences when nothing is visible; recommending is then
/// vacuous, which is the caller's concern, not an error here.
pub fn visible_items(store: &EntityStore, t: Timestep) -> VisibleItems {
    let mut embeddings = Vec::new();
    let mut pos2id = Vec::new();
    for item in store.available_items(t) {
        embeddings.push(item.embedding.clone());
        pos2id.push(item.id);
    }
    VisibleItems { embeddings, pos2id }
}
