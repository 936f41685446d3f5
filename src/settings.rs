//! Game settings
//!
//! Every tunable the simulation reads lives here. Defaults reproduce the
//! classic arcade timings; hosts may override them from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,

    // === Timing ===
    /// Main loop interval (ms)
    pub tick_interval_ms: u32,
    /// Delay between game end and the end screen (ms)
    pub end_message_delay_ms: u32,

    // === Hero ===
    /// Distance moved per directional input
    pub hero_step: f32,
    /// Lives at the start of a game
    pub starting_life: u32,
    /// Cooldown set when a laser is fired (ms)
    pub fire_cooldown_ms: u32,
    /// Amount removed from the cooldown per decay step (ms)
    pub cooldown_decay_ms: u32,
    /// Interval between cooldown decay steps (ms)
    pub cooldown_decay_interval_ms: u32,

    // === Enemies ===
    pub enemy_columns: u32,
    pub enemy_rows: u32,
    pub enemy_step: f32,
    pub enemy_interval_ms: u32,

    // === Lasers ===
    pub laser_step: f32,
    pub laser_interval_ms: u32,

    // === Scoring ===
    pub points_per_kill: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            tick_interval_ms: TICK_INTERVAL_MS,
            end_message_delay_ms: END_MESSAGE_DELAY_MS,

            hero_step: HERO_STEP,
            starting_life: HERO_START_LIFE,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            cooldown_decay_ms: COOLDOWN_DECAY_MS,
            cooldown_decay_interval_ms: COOLDOWN_DECAY_INTERVAL_MS,

            enemy_columns: ENEMY_COLUMNS,
            enemy_rows: ENEMY_ROWS,
            enemy_step: ENEMY_STEP,
            enemy_interval_ms: ENEMY_INTERVAL_MS,

            laser_step: LASER_STEP,
            laser_interval_ms: LASER_INTERVAL_MS,

            points_per_kill: POINTS_PER_KILL,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings if given, falling back to defaults on any problem
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({}x{} canvas)", settings.canvas_width, settings.canvas_height);
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp values that would stall the simulation (zero intervals)
    pub fn sanitized(mut self) -> Self {
        for interval in [
            &mut self.tick_interval_ms,
            &mut self.cooldown_decay_interval_ms,
            &mut self.enemy_interval_ms,
            &mut self.laser_interval_ms,
        ] {
            if *interval == 0 {
                log::warn!("Zero interval in settings, using 1ms");
                *interval = 1;
            }
        }
        self
    }

    /// Horizontal span of the enemy grid
    pub fn enemy_grid_width(&self) -> f32 {
        self.enemy_columns as f32 * ENEMY_WIDTH
    }
}
