//! Idle/demo mode input source
//!
//! Plays the game on its own: lines the hero's muzzle up under the lowest
//! enemy and fires whenever the cooldown allows. A seeded RNG adds a little
//! aim wobble so demo runs differ by seed but replay exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{LASER_OFFSET_X, LASER_WIDTH};
use crate::events::InputEvent;
use crate::sim::{EntityKind, GameState};

/// Largest aim offset (px) the autopilot settles for
const MAX_WOBBLE: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    wobble: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wobble: 0.0,
        }
    }

    /// Pick the next input for `state`, `None` to idle this step
    pub fn next_input(&mut self, state: &GameState) -> Option<InputEvent> {
        if state.phase.is_terminal() {
            return Some(InputEvent::Confirm);
        }

        let hero = state.hero_entity().filter(|h| h.alive)?;
        let muzzle_x = hero.pos.x + LASER_OFFSET_X + LASER_WIDTH / 2.0;

        // Lowest enemy is the most dangerous one
        let target = state
            .entities
            .iter()
            .filter(|e| e.is_live(EntityKind::Enemy))
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;
        let target_x = target.pos.x + target.size.x / 2.0 + self.wobble;

        let dx = target_x - muzzle_x;
        let step = state.settings.hero_step;
        if dx > step {
            Some(InputEvent::MoveRight)
        } else if dx < -step {
            Some(InputEvent::MoveLeft)
        } else if state.hero.can_fire() {
            self.wobble = self.rng.random_range(-MAX_WOBBLE..=MAX_WOBBLE);
            Some(InputEvent::Fire)
        } else if self.rng.random_bool(0.1) {
            Some(if self.rng.random_bool(0.5) {
                InputEvent::MoveLeft
            } else {
                InputEvent::MoveRight
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{apply_input, tick};
    use glam::Vec2;

    #[test]
    fn test_steers_toward_lowest_enemy() {
        let mut state = GameState::new(Settings::default());
        state.entities.retain(|e| e.is(EntityKind::Hero));
        state.spawn_enemy(Vec2::new(0.0, 0.0));
        state.spawn_enemy(Vec2::new(900.0, 200.0));

        let mut pilot = Autopilot::new(1);
        assert_eq!(pilot.next_input(&state), Some(InputEvent::MoveRight));
    }

    #[test]
    fn test_fires_when_lined_up() {
        let mut state = GameState::new(Settings::default());
        state.entities.retain(|e| e.is(EntityKind::Hero));
        let hero_x = state.hero_entity().unwrap().pos.x;
        // Enemy centered over the muzzle
        let muzzle_x = hero_x + LASER_OFFSET_X + LASER_WIDTH / 2.0;
        state.spawn_enemy(Vec2::new(muzzle_x - 49.0, 0.0));

        let mut pilot = Autopilot::new(7);
        assert_eq!(pilot.next_input(&state), Some(InputEvent::Fire));
    }

    #[test]
    fn test_confirms_after_game_end() {
        let mut state = GameState::new(Settings::default());
        state.phase = crate::sim::GamePhase::Lost;
        assert_eq!(Autopilot::new(0).next_input(&state), Some(InputEvent::Confirm));
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::new(Settings::default());
            let mut pilot = Autopilot::new(seed);
            let mut inputs = Vec::new();
            for _ in 0..300 {
                let input = pilot.next_input(&state);
                if let Some(input) = input {
                    apply_input(&mut state, input);
                }
                inputs.push(input);
                tick(&mut state, 100);
            }
            (inputs, state.hero.points, state.entities.len())
        };
        assert_eq!(run(42), run(42));
    }
}
