//! recsim core library.
//!
//! A synthetic, reproducible simulation of a recommendation interaction
//! loop: a population of users and items embedded in a shared latent
//! space, stepped by an external policy. Each step scores a proposed
//! recommendation with a proximity-based choice model, samples click
//! outcomes, drifts the active user's preferences, and re-selects the
//! active user via a Markov switching rule. All randomness flows through
//! one seeded stream, so runs are bit-for-bit reproducible given the same
//! seed and action sequence.
//!
//! # Architecture
//!
//! - **Entity store** (`store`): owns users and items, sole id authority.
//! - **Availability filter** (`availability`): the per-step position ->
//!   item-id view over the not-yet-expired items.
//! - **Reward model** (`reward`): distance-based click probabilities and
//!   Bernoulli outcomes.
//! - **Dynamics engine** (`dynamics`): AR(1) preference drift and
//!   active-user switching.
//! - **Interaction log** (`log`): append-only step history with per-user
//!   views.
//! - **Session loop** (`env`): `RecEnv` with the reset/step contract, plus
//!   `VecEnv` for vectorised rollouts.
//! - **Ports** (`render`, `logging`): visualization and telemetry seams;
//!   the core is fully testable with neither present.
//!
//! The binary (`src/main.rs`) is just a thin research harness around these
//! components.

pub mod availability;
pub mod clusters;
pub mod config;
pub mod dynamics;
pub mod env;
pub mod log;
pub mod logging;
pub mod observation;
pub mod render;
pub mod reward;
pub(crate) mod sampling;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use availability::{visible_items, VisibleItems};
pub use clusters::generate_clustered_points;
pub use config::{Config, ConfigError, UserMode};
pub use dynamics::{DriftModel, UserSwitch};
pub use env::{EnvError, RecEnv, StepInfo, StepResult, VecEnv};
pub use log::InteractionLog;
pub use logging::{JsonlSink, NoopSink, StepSink};
pub use observation::Observation;
pub use render::{Frame, IdentityProjector, NoopRenderer, Projector, RenderScene, Renderer};
pub use reward::{RewardModel, Scored};
pub use store::EntityStore;
pub use types::{Embedding, Interaction, Item, ItemId, Timestep, User, UserId};
