// src/reward.rs
//
// Reward model: proximity-based choice model over the latent space.
//
// The click probability for an item is `exp(-(||u - i||_2 + eps))` with
// `eps ~ N(0, noise^2)` drawn fresh per item. Closer items are more likely
// to be clicked; the noise perturbs the distance, so the raw value can
// exceed 1 and is clamped before sampling.
//
// Stream discipline: scoring a recommendation consumes exactly one noise
// sample followed by one Bernoulli sample per item, in recommendation
// order. Position i's draws happen strictly before position i+1's.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::sampling::standard_normal;
use crate::store::EntityStore;
use crate::types::{Embedding, ItemId, UserId};

/// Euclidean distance between two embeddings.
fn l2_distance(a: &Embedding, b: &Embedding) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Outcome of scoring one recommendation, in positional correspondence
/// with the recommended item ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored {
    pub rewards: Vec<u8>,
    pub probs: Vec<f64>,
}

impl Scored {
    /// Sum of the sampled click outcomes.
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().map(|&r| f64::from(r)).sum()
    }
}

/// Converts (user embedding, item embedding) pairs into click
/// probabilities and sampled outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    /// Standard deviation of the distance noise.
    pub noise: f64,
}

impl RewardModel {
    pub fn new(noise: f64) -> Self {
        Self { noise }
    }

    /// Click probability for one item. Draws one noise sample from the
    /// shared stream and clamps the result into [0, 1].
    pub fn probability(
        &self,
        user_embedding: &Embedding,
        item_embedding: &Embedding,
        rng: &mut ChaCha8Rng,
    ) -> f64 {
        let eps = self.noise * standard_normal(rng);
        let raw = (-(l2_distance(user_embedding, item_embedding) + eps)).exp();
        raw.clamp(0.0, 1.0)
    }

    /// One Bernoulli outcome with parameter `p`, as a single uniform draw.
    pub fn sample(&self, p: f64, rng: &mut ChaCha8Rng) -> u8 {
        u8::from(rng.gen::<f64>() < p)
    }

    /// Score a resolved recommendation against the active user, item by
    /// item in the given order.
    pub fn score_recommendation(
        &self,
        active_user: UserId,
        item_ids: &[ItemId],
        store: &EntityStore,
        rng: &mut ChaCha8Rng,
    ) -> Scored {
        let user_embedding = &store.user(active_user).embedding;
        let mut rewards = Vec::with_capacity(item_ids.len());
        let mut probs = Vec::with_capacity(item_ids.len());
        for &id in item_ids {
            let p = self.probability(user_embedding, &store.item(id).embedding, rng);
            rewards.push(self.sample(p, rng));
            probs.push(p);
        }
        Scored { rewards, probs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn store_one_user(user: Embedding, items: &[Embedding]) -> EntityStore {
        let mut store = EntityStore::new();
        store.create_user(user);
        for item in items {
            store.create_item_permanent(item.clone());
        }
        store
    }

    #[test]
    fn zero_noise_probability_is_exact() {
        let model = RewardModel::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // Distance 3-4-5 triangle: ||(3,4)|| = 5.
        let p = model.probability(&vec![0.0, 0.0], &vec![3.0, 4.0], &mut rng);
        assert!((p - (-5.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn identical_embeddings_click_with_certainty_at_zero_noise() {
        let model = RewardModel::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let e = vec![1.5, -2.0];
        let p = model.probability(&e, &e, &mut rng);
        assert_eq!(p, 1.0);
        assert_eq!(model.sample(p, &mut rng), 1);
    }

    #[test]
    fn probability_is_clamped_under_heavy_noise() {
        let model = RewardModel::new(50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        for _ in 0..1000 {
            let p = model.probability(&vec![0.0], &vec![0.1], &mut rng);
            assert!((0.0..=1.0).contains(&p), "probability out of range: {p}");
        }
    }

    #[test]
    fn scoring_preserves_recommendation_order_and_length() {
        let store = store_one_user(
            vec![0.0, 0.0],
            &[vec![0.0, 0.0], vec![5.0, 5.0], vec![1.0, 0.0]],
        );
        let model = RewardModel::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let scored = model.score_recommendation(0, &[2, 0, 1], &store, &mut rng);
        assert_eq!(scored.rewards.len(), 3);
        assert_eq!(scored.probs.len(), 3);
        // Order matters: position 1 is the co-located item.
        assert_eq!(scored.probs[1], 1.0);
        assert!(scored.probs[0] > scored.probs[2]);
    }

    #[test]
    fn scoring_is_deterministic_given_stream_state() {
        let store = store_one_user(vec![0.0, 0.0], &[vec![1.0, 1.0], vec![2.0, 0.5]]);
        let model = RewardModel::new(0.3);

        let mut rng1 = ChaCha8Rng::seed_from_u64(77);
        let mut rng2 = ChaCha8Rng::seed_from_u64(77);
        let a = model.score_recommendation(0, &[0, 1], &store, &mut rng1);
        let b = model.score_recommendation(0, &[0, 1], &store, &mut rng2);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_recommendation_scores_empty() {
        let store = store_one_user(vec![0.0], &[vec![1.0]]);
        let model = RewardModel::new(0.1);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let scored = model.score_recommendation(0, &[], &store, &mut rng);
        assert!(scored.rewards.is_empty());
        assert!(scored.probs.is_empty());
        assert_eq!(scored.total_reward(), 0.0);
    }
}
