// src/config.rs
//
// Central configuration for the recsim environment.
// This is the single source of truth for the flat construction contract:
// population sizes, embedding geometry, choice-model noise, and the
// active-user switching / preference-drift parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preference-transition mode for the simulated users.
///
/// Selected once at construction; the dynamics engine turns this into a
/// concrete drift strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserMode {
    /// User embeddings are frozen between steps.
    Static,
    /// The active user's embedding follows an AR(1) update each step.
    Drifting,
}

/// Flat environment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of users in the simulated population.
    pub n_users: usize,
    /// Number of items generated at construction.
    pub n_items: usize,
    /// Recommendation slot count. Also the number of cluster centers used
    /// when generating the initial item embeddings.
    pub n_rec: usize,
    /// Dimensionality of the shared latent space.
    pub embedding_dimension: usize,
    /// Variance of the cluster-center distribution.
    pub cluster_var: f64,
    /// Variance of items around their cluster center.
    pub in_cluster_var: f64,
    /// Probability mass with which the active user changes each step.
    /// The mass is spread uniformly over the other `n_users - 1` users.
    pub user_change_prob: f64,
    /// Standard deviation of the noise added to the user-item distance
    /// inside the click-probability model.
    pub reward_noise: f64,
    /// Standard deviation of the initial user embeddings.
    pub user_init_sigma: f64,
    /// AR(1) coefficient for preference drift, in [-1, 1].
    pub user_ar_coef: f64,
    /// Stationary standard deviation of the drifting embedding.
    pub user_drift_sigma: f64,
    /// Seed for the single shared random stream.
    pub seed: u64,
    /// Preference-transition mode.
    pub user_mode: UserMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_users: 10,
            n_items: 50,
            n_rec: 4,
            embedding_dimension: 2,
            cluster_var: 1.0,
            in_cluster_var: 0.1,
            user_change_prob: 0.1,
            reward_noise: 0.1,
            user_init_sigma: 1.0,
            user_ar_coef: 0.9,
            user_drift_sigma: 1.0,
            seed: 0,
            user_mode: UserMode::Static,
        }
    }
}

impl Config {
    /// A fully deterministic configuration: no reward noise, no user
    /// switching, frozen preferences. The active user and all outcomes are
    /// then exact functions of the seed and the action sequence.
    pub fn deterministic() -> Self {
        Self {
            n_users: 2,
            n_items: 3,
            n_rec: 2,
            embedding_dimension: 2,
            cluster_var: 1.0,
            in_cluster_var: 0.1,
            user_change_prob: 0.0,
            reward_noise: 0.0,
            user_init_sigma: 1.0,
            user_ar_coef: 0.9,
            user_drift_sigma: 1.0,
            seed: 42,
            user_mode: UserMode::Static,
        }
    }

    /// Validate the configuration. Fatal at construction: `RecEnv::new`
    /// refuses to build an environment from an invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_users == 0 {
            return Err(ConfigError::EmptyPopulation { field: "n_users" });
        }
        if self.n_items == 0 {
            return Err(ConfigError::EmptyPopulation { field: "n_items" });
        }
        if self.n_rec == 0 {
            return Err(ConfigError::EmptyPopulation { field: "n_rec" });
        }
        if self.embedding_dimension == 0 {
            return Err(ConfigError::EmptyPopulation {
                field: "embedding_dimension",
            });
        }
        if !(0.0..=1.0).contains(&self.user_change_prob) {
            return Err(ConfigError::OutOfRange {
                field: "user_change_prob",
                value: self.user_change_prob,
            });
        }
        // The switch mass is spread over n_users - 1 other users, so a
        // nonzero mass needs at least one other user to receive it.
        if self.user_change_prob > 0.0 && self.n_users < 2 {
            return Err(ConfigError::SwitchWithoutPeers {
                n_users: self.n_users,
                user_change_prob: self.user_change_prob,
            });
        }
        if !(-1.0..=1.0).contains(&self.user_ar_coef) {
            return Err(ConfigError::OutOfRange {
                field: "user_ar_coef",
                value: self.user_ar_coef,
            });
        }
        for (field, value) in [
            ("cluster_var", self.cluster_var),
            ("in_cluster_var", self.in_cluster_var),
            ("reward_noise", self.reward_noise),
            ("user_init_sigma", self.user_init_sigma),
            ("user_drift_sigma", self.user_drift_sigma),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Configuration errors, fatal at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigError {
    /// A population / size field is zero.
    EmptyPopulation { field: &'static str },
    /// A numeric field is outside its admissible range.
    OutOfRange { field: &'static str, value: f64 },
    /// Nonzero switching mass with fewer than two users: the mass has no
    /// other user to land on.
    SwitchWithoutPeers { n_users: usize, user_change_prob: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPopulation { field } => {
                write!(f, "config field `{field}` must be nonzero")
            }
            ConfigError::OutOfRange { field, value } => {
                write!(f, "config field `{field}` out of range: {value}")
            }
            ConfigError::SwitchWithoutPeers {
                n_users,
                user_change_prob,
            } => write!(
                f,
                "user_change_prob={user_change_prob} requires at least 2 users, got {n_users}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
