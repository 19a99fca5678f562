//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame stepping only (one `tick` per animation frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::rim_score;
pub use score::{Difficulty, Scoreboard, difficulty_for_streak};
pub use state::{Ball, Bounds, GameEvent, GameState, Hoop, Particle, Snapshot};
pub use tick::{FrameInput, Launch, tick};
