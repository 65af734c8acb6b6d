// src/types.rs
//
// Common shared types for the recsim simulation core.

use serde::{Deserialize, Serialize};

/// Stable user identifier. Dense, assigned in creation order, never reused.
pub type UserId = usize;

/// Stable item identifier. Dense, assigned in creation order, never reused.
pub type ItemId = usize;

/// Discrete simulation time index.
pub type Timestep = u64;

/// Latent position of a user or item in the shared embedding space.
pub type Embedding = Vec<f64>;

/// A member of the simulated population.
///
/// The embedding is mutated in place only by the dynamics engine, and only
/// while this user is the active user. Users are never destroyed during a
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub embedding: Embedding,
}

/// A recommendable item.
///
/// Immutable after creation. `use_until` is the exclusive time horizon:
/// the item is recommendable at time `t` iff `(t as f64) < use_until`, with
/// `f64::INFINITY` meaning always recommendable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub embedding: Embedding,
    pub use_until: f64,
}

impl Item {
    /// Whether the item is recommendable at time `t`.
    pub fn is_available(&self, t: Timestep) -> bool {
        (t as f64) < self.use_until
    }
}

/// One append-only record of a completed step.
///
/// `recs`, `rewards` and `probs` are in positional correspondence: index i
/// of each refers to the i-th recommended item. Never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Time at which the recommendation was issued.
    pub t: Timestep,
    /// User the recommendation was shown to.
    pub uid: UserId,
    /// Recommended items, by stable id, in recommendation order.
    pub recs: Vec<ItemId>,
    /// Sampled click outcomes, 0 or 1 per recommended item.
    pub rewards: Vec<u8>,
    /// Click probabilities in [0, 1], one per recommended item.
    pub probs: Vec<f64>,
}
