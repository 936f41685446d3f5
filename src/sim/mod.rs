//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, movement advanced by the central tick
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Collision, Rect, intersects};
pub use entity::{Behavior, Entity, EntityKind, HeroStats};
pub use state::{GamePhase, GameState};
pub use tick::{apply_input, tick};
