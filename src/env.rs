// src/env.rs
//
// Session loop: the gym-style recommendation environment.
//
// RecEnv owns every piece of mutable simulation state (entity store, time,
// active user, interaction log, the single random stream) so there is no
// ambient state anywhere. All state transitions are deterministic given
// the seed and the action sequence.
//
// Stream order, fixed for reproducibility:
// - construction: per-user initial embeddings (one standard-normal vector
//   each, in user order), then the cluster centers (n_rec vectors), then
//   the initial active user (one uniform draw). Item embeddings come from
//   the clustered generator, which runs on its own stream seeded from the
//   same config seed and does not advance the session stream.
// - step: one noise sample + one Bernoulli sample per recommended item in
//   recommendation order, then the drift draws (if drifting), then one
//   switch draw.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::availability::{visible_items, VisibleItems};
use crate::clusters::generate_clustered_points;
use crate::config::{Config, ConfigError};
use crate::dynamics::{DriftModel, UserSwitch};
use crate::log::InteractionLog;
use crate::observation::Observation;
use crate::render::RenderScene;
use crate::reward::RewardModel;
use crate::sampling::normal_vector;
use crate::store::EntityStore;
use crate::types::{Interaction, ItemId, Timestep, UserId};

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// The observation after taking the action.
    pub observation: Observation,
    /// Sum of the step's sampled click outcomes.
    pub reward: f64,
    /// Always false: the simulation never terminates on its own.
    /// Stopping is the caller's step limit.
    pub done: bool,
    /// Additional information about the step.
    pub info: StepInfo,
}

/// Additional information returned from a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Time index the interaction was recorded under.
    pub t: Timestep,
    /// Active user selected for the next step.
    pub active_user: UserId,
    /// Number of items visible to the next action.
    pub n_visible: usize,
}

/// Errors surfaced by `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvError {
    /// The action referenced a position outside the current visible-item
    /// range. A contract violation by the caller; the step has no effect.
    InvalidPosition { position: usize, visible: usize },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::InvalidPosition { position, visible } => write!(
                f,
                "action position {position} out of range: {visible} items visible"
            ),
        }
    }
}

impl std::error::Error for EnvError {}

/// Gym-style recommendation environment.
///
/// - `reset() -> observation`
/// - `step(action) -> (observation, reward, done, info)`
///
/// where the observation is the active user's embedding plus the ordered
/// embeddings of the currently visible items, and the action is a sequence
/// of positions into that visible-item sequence.
#[derive(Debug, Clone)]
pub struct RecEnv {
    config: Config,
    store: EntityStore,
    reward: RewardModel,
    drift: DriftModel,
    switch: UserSwitch,
    log: InteractionLog,
    rng: ChaCha8Rng,
    time: Timestep,
    active_user: UserId,
    /// Current position -> id view. A recomputed projection of the item
    /// store, never carried across steps.
    visible: VisibleItems,
}

impl RecEnv {
    /// Build an environment from a flat configuration.
    ///
    /// Fails fast on an invalid configuration; construction performs all
    /// stochastic initialization (user embeddings, cluster centers, item
    /// embeddings, initial active user).
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let dim = config.embedding_dimension;
        let mut store = EntityStore::new();

        for _ in 0..config.n_users {
            let embedding = normal_vector(dim, &mut rng)
                .into_iter()
                .map(|x| config.user_init_sigma * x)
                .collect();
            store.create_user(embedding);
        }

        let center_scale = config.cluster_var.sqrt();
        let centers: Vec<_> = (0..config.n_rec)
            .map(|_| {
                normal_vector(dim, &mut rng)
                    .into_iter()
                    .map(|x| center_scale * x)
                    .collect()
            })
            .collect();

        let item_embeddings = generate_clustered_points(
            config.n_items,
            dim,
            &centers,
            config.in_cluster_var.sqrt(),
            config.seed,
        );
        for embedding in item_embeddings {
            store.create_item_permanent(embedding);
        }

        let active_user = rng.gen_range(0..config.n_users);

        let visible = visible_items(&store, 0);
        let log = InteractionLog::new(config.n_users);

        Ok(Self {
            reward: RewardModel::new(config.reward_noise),
            drift: DriftModel::from_config(&config),
            switch: UserSwitch::from_config(&config),
            config,
            store,
            log,
            rng,
            time: 0,
            active_user,
            visible,
        })
    }

    /// Recompute and return the current observation.
    ///
    /// Deliberately does NOT start a new episode: no reseeding, no clearing
    /// of time, entities or the interaction log. Repeated calls without an
    /// intervening `step` return the same observation and have no other
    /// effect.
    pub fn reset(&mut self) -> Observation {
        self.visible = visible_items(&self.store, self.time);
        self.observation()
    }

    /// Advance the simulation by one step.
    ///
    /// The action is validated in full before any draw or mutation, so a
    /// failed step leaves the environment byte-identical to before the
    /// call: no log entry, no state change, no stream consumption.
    pub fn step(&mut self, action: &[usize]) -> Result<StepResult, EnvError> {
        let mut recs: Vec<ItemId> = Vec::with_capacity(action.len());
        for &position in action {
            match self.visible.pos2id.get(position) {
                Some(&id) => recs.push(id),
                None => {
                    return Err(EnvError::InvalidPosition {
                        position,
                        visible: self.visible.len(),
                    })
                }
            }
        }

        let scored =
            self.reward
                .score_recommendation(self.active_user, &recs, &self.store, &mut self.rng);
        let reward_total = scored.total_reward();

        self.log.record(Interaction {
            t: self.time,
            uid: self.active_user,
            recs,
            rewards: scored.rewards,
            probs: scored.probs,
        });

        let recorded_t = self.time;
        self.drift.advance(
            &mut self.store.user_mut(self.active_user).embedding,
            &mut self.rng,
        );
        self.active_user = self.switch.next_active_user(self.active_user, &mut self.rng);

        self.time += 1;
        self.visible = visible_items(&self.store, self.time);

        Ok(StepResult {
            observation: self.observation(),
            reward: reward_total,
            done: false,
            info: StepInfo {
                t: recorded_t,
                active_user: self.active_user,
                n_visible: self.visible.len(),
            },
        })
    }

    fn observation(&self) -> Observation {
        Observation {
            user_embedding: self.store.user(self.active_user).embedding.clone(),
            item_embeddings: self.visible.embeddings.clone(),
        }
    }

    /// Snapshot of the latent space for the visualization port.
    pub fn render_scene(&self) -> RenderScene {
        RenderScene {
            users: self
                .store
                .users()
                .iter()
                .map(|u| u.embedding.clone())
                .collect(),
            items: self
                .store
                .items()
                .iter()
                .map(|i| i.embedding.clone())
                .collect(),
            active_user: self.active_user,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    pub fn time(&self) -> Timestep {
        self.time
    }

    pub fn active_user(&self) -> UserId {
        self.active_user
    }

    /// Number of items visible to the next action.
    pub fn n_visible(&self) -> usize {
        self.visible.len()
    }

    /// Current position -> stable id mapping.
    pub fn item_pos2id(&self) -> &[ItemId] {
        &self.visible.pos2id
    }
}

/// Vectorised environment: N independent sessions stepped together.
///
/// Environment i is constructed from the base configuration with its seed
/// offset by i, so sessions are decorrelated but jointly reproducible.
pub struct VecEnv {
    envs: Vec<RecEnv>,
}

impl VecEnv {
    pub fn new(n: usize, base_config: Config) -> Result<Self, ConfigError> {
        let envs = (0..n)
            .map(|i| {
                let mut config = base_config.clone();
                config.seed = base_config.seed.wrapping_add(i as u64);
                RecEnv::new(config)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { envs })
    }

    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Recompute all observations.
    pub fn reset_all(&mut self) -> Vec<Observation> {
        self.envs.iter_mut().map(|env| env.reset()).collect()
    }

    /// Step every environment with its own action.
    ///
    /// `actions` must have one entry per environment.
    pub fn step(&mut self, actions: &[Vec<usize>]) -> Result<Vec<StepResult>, EnvError> {
        assert_eq!(
            actions.len(),
            self.envs.len(),
            "actions length must match number of environments"
        );
        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(env, action)| env.step(action))
            .collect()
    }

    pub fn envs(&self) -> &[RecEnv] {
        &self.envs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_population_from_config() {
        let env = RecEnv::new(Config::default()).expect("valid config");
        assert_eq!(env.store().n_users(), 10);
        assert_eq!(env.store().n_items(), 50);
        assert_eq!(env.time(), 0);
        assert!(env.active_user() < 10);
        assert_eq!(env.n_visible(), 50);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = Config {
            n_users: 1,
            user_change_prob: 0.5,
            ..Config::default()
        };
        assert!(RecEnv::new(config).is_err());
    }

    #[test]
    fn step_advances_time_and_records() {
        let mut env = RecEnv::new(Config::deterministic()).expect("valid config");
        let result = env.step(&[0, 1]).expect("valid action");

        assert_eq!(env.time(), 1);
        assert_eq!(env.log().len(), 1);
        assert!(!result.done);
        assert_eq!(result.info.t, 0);
        assert_eq!(result.observation.n_visible(), 3);

        let record = &env.log().interactions()[0];
        assert_eq!(record.recs.len(), 2);
        assert_eq!(record.rewards.len(), 2);
        assert_eq!(record.probs.len(), 2);
    }

    #[test]
    fn invalid_position_fails_without_side_effects() {
        let mut env = RecEnv::new(Config::deterministic()).expect("valid config");
        let before = env.clone();

        let err = env.step(&[0, 99]).expect_err("position 99 is out of range");
        assert_eq!(
            err,
            EnvError::InvalidPosition {
                position: 99,
                visible: 3,
            }
        );

        // All-or-nothing: nothing moved, nothing logged, stream untouched.
        assert_eq!(env.time(), before.time());
        assert_eq!(env.active_user(), before.active_user());
        assert_eq!(env.log().len(), 0);
        let after_good_step = env.step(&[0]).expect("valid action");
        let mut replay = before;
        assert_eq!(replay.step(&[0]).expect("valid action"), after_good_step);
    }

    #[test]
    fn empty_action_is_vacuous_but_advances_state() {
        let mut env = RecEnv::new(Config::deterministic()).expect("valid config");
        let result = env.step(&[]).expect("empty action is allowed");
        assert_eq!(result.reward, 0.0);
        assert_eq!(env.time(), 1);
        assert_eq!(env.log().interactions()[0].recs.len(), 0);
    }

    #[test]
    fn vec_env_sessions_are_independent() {
        let mut vec_env = VecEnv::new(3, Config::default()).expect("valid config");
        assert_eq!(vec_env.num_envs(), 3);

        let observations = vec_env.reset_all();
        assert_eq!(observations.len(), 3);

        let actions = vec![vec![0], vec![0], vec![0]];
        let results = vec_env.step(&actions).expect("valid actions");
        assert_eq!(results.len(), 3);
        for (env, result) in vec_env.envs().iter().zip(&results) {
            assert_eq!(env.time(), 1);
            assert!(!result.done);
        }
    }
}
