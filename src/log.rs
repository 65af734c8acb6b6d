// src/log.rs
//
// Interaction log: durable, append-only record of every step, plus
// per-user convenience views appended in the same step. Pure bookkeeping;
// growth is unbounded for the life of a session, which is acceptable for
// short research runs.

use serde::{Deserialize, Serialize};

use crate::types::{Interaction, ItemId, UserId};

/// Append-only interaction history.
///
/// The per-user views are vectors indexed by the dense user id, so lookups
/// and serialization are order-deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLog {
    interactions: Vec<Interaction>,
    recommendations: Vec<Vec<Vec<ItemId>>>,
    rewards: Vec<Vec<Vec<u8>>>,
    probs: Vec<Vec<Vec<f64>>>,
}

impl InteractionLog {
    pub fn new(n_users: usize) -> Self {
        Self {
            interactions: Vec::new(),
            recommendations: vec![Vec::new(); n_users],
            rewards: vec![Vec::new(); n_users],
            probs: vec![Vec::new(); n_users],
        }
    }

    /// Append one step's record and update that user's views.
    pub fn record(&mut self, interaction: Interaction) {
        let uid = interaction.uid;
        self.recommendations[uid].push(interaction.recs.clone());
        self.rewards[uid].push(interaction.rewards.clone());
        self.probs[uid].push(interaction.probs.clone());
        self.interactions.push(interaction);
    }

    /// All records, in step order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Recommendation lists issued to `uid`, in step order.
    pub fn recommendations_for(&self, uid: UserId) -> &[Vec<ItemId>] {
        &self.recommendations[uid]
    }

    /// Reward lists observed for `uid`, in step order.
    pub fn rewards_for(&self, uid: UserId) -> &[Vec<u8>] {
        &self.rewards[uid]
    }

    /// Probability lists computed for `uid`, in step order.
    pub fn probs_for(&self, uid: UserId) -> &[Vec<f64>] {
        &self.probs[uid]
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(t: u64, uid: UserId) -> Interaction {
        Interaction {
            t,
            uid,
            recs: vec![t as usize, t as usize + 1],
            rewards: vec![1, 0],
            probs: vec![0.9, 0.1],
        }
    }

    #[test]
    fn records_accumulate_in_step_order() {
        let mut log = InteractionLog::new(2);
        log.record(interaction(0, 1));
        log.record(interaction(1, 0));
        log.record(interaction(2, 1));

        assert_eq!(log.len(), 3);
        let ts: Vec<u64> = log.interactions().iter().map(|i| i.t).collect();
        assert_eq!(ts, vec![0, 1, 2]);
    }

    #[test]
    fn per_user_views_track_the_same_step() {
        let mut log = InteractionLog::new(3);
        log.record(interaction(0, 2));
        log.record(interaction(1, 2));
        log.record(interaction(2, 0));

        assert_eq!(log.recommendations_for(2).len(), 2);
        assert_eq!(log.rewards_for(2).len(), 2);
        assert_eq!(log.probs_for(2).len(), 2);
        assert_eq!(log.recommendations_for(1).len(), 0);
        assert_eq!(log.recommendations_for(0), &[vec![2, 3]]);
    }
}
