// src/dynamics.rs
//
// Dynamics engine: advances latent state between steps.
//
// Two independent mechanisms, both fed by the shared stream:
// - preference drift of the active user's embedding (strategy selected
//   once at construction),
// - Markov switching of the active user.
//
// Stream discipline per step: the drift draws (one standard-normal sample
// per embedding component, in component order) happen before the single
// switch draw.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Config, UserMode};
use crate::sampling::standard_normal;
use crate::types::{Embedding, UserId};

/// Preference-drift strategy, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DriftModel {
    /// Identity transition: embeddings never move.
    Frozen,
    /// AR(1) update: `new = coef * old + sqrt(1 - coef^2) * sigma * N(0, I)`.
    ///
    /// Stationarity-preserving: if the embedding's component variance is
    /// `sigma^2` it stays `sigma^2` after each update, so preference
    /// magnitude neither grows nor collapses over arbitrarily many steps.
    Ar1 { coef: f64, sigma: f64 },
}

impl DriftModel {
    pub fn from_config(config: &Config) -> Self {
        match config.user_mode {
            UserMode::Static => DriftModel::Frozen,
            UserMode::Drifting => DriftModel::Ar1 {
                coef: config.user_ar_coef,
                sigma: config.user_drift_sigma,
            },
        }
    }

    /// Advance one embedding in place. `Frozen` draws nothing; `Ar1`
    /// consumes one standard-normal sample per component.
    pub fn advance(&self, embedding: &mut Embedding, rng: &mut ChaCha8Rng) {
        match *self {
            DriftModel::Frozen => {}
            DriftModel::Ar1 { coef, sigma } => {
                let innovation_scale = (1.0 - coef * coef).sqrt() * sigma;
                for component in embedding.iter_mut() {
                    *component = coef * *component + innovation_scale * standard_normal(rng);
                }
            }
        }
    }
}

/// Step-stationary Markov chain over the population.
///
/// With probability `1 - change_prob` the active user stays; the remaining
/// mass is spread uniformly over the other `n_users - 1` users. A switch
/// never reselects the current user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSwitch {
    pub change_prob: f64,
    pub n_users: usize,
}

impl UserSwitch {
    pub fn from_config(config: &Config) -> Self {
        Self {
            change_prob: config.user_change_prob,
            n_users: config.n_users,
        }
    }

    /// Select the next active user with a single uniform draw.
    ///
    /// The draw is mapped by inverse CDF: the leading `1 - change_prob`
    /// mass keeps `current`; the residual mass is partitioned equally among
    /// the other users in id order.
    pub fn next_active_user(&self, current: UserId, rng: &mut ChaCha8Rng) -> UserId {
        let u: f64 = rng.gen();
        let stay_mass = 1.0 - self.change_prob;
        if u < stay_mass {
            return current;
        }
        // Config validation guarantees n_users >= 2 whenever change_prob > 0.
        let n_others = self.n_users - 1;
        let residual = (u - stay_mass) / self.change_prob;
        let mut slot = (residual * n_others as f64) as usize;
        if slot >= n_others {
            slot = n_others - 1;
        }
        if slot < current {
            slot
        } else {
            slot + 1
        }
    }
}
