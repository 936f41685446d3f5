//! Laser Invaders - a Space Invaders style arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, movement, collisions, game state)
//! - `events`: Named-message publish/subscribe bus
//! - `driver`: Fixed-interval tick driver
//! - `game`: Ties state, bus and driver together (win/loss, restart)
//! - `render`: Render command list handed to the host renderer
//! - `settings`: Data-driven game configuration
//! - `autopilot`: Seeded idle-mode input source

pub mod autopilot;
pub mod driver;
pub mod events;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;

pub use events::{EventBus, GameEvent, Message};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 1024.0;
    pub const CANVAS_HEIGHT: f32 = 768.0;

    /// Main loop interval (ms)
    pub const TICK_INTERVAL_MS: u32 = 100;
    /// Delay before the end screen is shown, lets in-flight frames settle (ms)
    pub const END_MESSAGE_DELAY_MS: u32 = 200;

    /// Sprite sizes, fixed per entity kind
    pub const HERO_WIDTH: f32 = 99.0;
    pub const HERO_HEIGHT: f32 = 75.0;
    pub const ENEMY_WIDTH: f32 = 98.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    pub const LASER_WIDTH: f32 = 9.0;
    pub const LASER_HEIGHT: f32 = 33.0;

    /// Hero defaults
    pub const HERO_STEP: f32 = 5.0;
    pub const HERO_START_LIFE: u32 = 3;
    /// Laser muzzle offset from the hero's top-left corner
    pub const LASER_OFFSET_X: f32 = 45.0;
    pub const LASER_OFFSET_Y: f32 = -10.0;

    /// Fire rate limiting (ms)
    pub const FIRE_COOLDOWN_MS: u32 = 500;
    pub const COOLDOWN_DECAY_MS: u32 = 100;
    pub const COOLDOWN_DECAY_INTERVAL_MS: u32 = 200;

    /// Enemies drop 5px every 300ms
    pub const ENEMY_STEP: f32 = 5.0;
    pub const ENEMY_INTERVAL_MS: u32 = 300;
    /// Lasers climb 15px every 100ms
    pub const LASER_STEP: f32 = 15.0;
    pub const LASER_INTERVAL_MS: u32 = 100;

    /// Enemy grid
    pub const ENEMY_COLUMNS: u32 = 5;
    pub const ENEMY_ROWS: u32 = 5;

    /// Score for each enemy shot down
    pub const POINTS_PER_KILL: u64 = 100;
}
