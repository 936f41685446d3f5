//! Fixed timestep simulation tick
//!
//! One tick runs, in order: movement and cooldown, collision detection,
//! purge of dead entities. Drawing happens afterwards in the driver.

use glam::Vec2;

use super::collision::{Collision, intersects};
use super::entity::EntityKind;
use super::state::GameState;
use crate::events::{GameEvent, InputEvent};

/// Apply a single player input. Returns false when the input had no effect.
///
/// `Confirm` is not handled here; restarting is the driver's job.
pub fn apply_input(state: &mut GameState, input: InputEvent) -> bool {
    if state.phase.is_terminal() {
        return false;
    }

    let step = state.settings.hero_step;
    let delta = match input {
        InputEvent::MoveUp => Vec2::new(0.0, -step),
        InputEvent::MoveDown => Vec2::new(0.0, step),
        InputEvent::MoveLeft => Vec2::new(-step, 0.0),
        InputEvent::MoveRight => Vec2::new(step, 0.0),
        InputEvent::Fire => return state.try_fire().is_some(),
        InputEvent::Confirm => return false,
    };

    match state.hero_entity_mut() {
        Some(hero) if hero.alive => {
            hero.pos += delta;
            true
        }
        _ => false,
    }
}

/// Advance the game state by one fixed timestep of `dt_ms`
pub fn tick(state: &mut GameState, dt_ms: u32) {
    if state.phase.is_terminal() {
        return;
    }

    state.time_ms += u64::from(dt_ms);

    // Movement
    for entity in &mut state.entities {
        entity.advance(dt_ms);
    }
    let settings = &state.settings;
    state.hero.decay_cooldown(
        dt_ms,
        settings.cooldown_decay_ms,
        settings.cooldown_decay_interval_ms,
    );

    detect_collisions(state);

    state.purge_dead();
}

/// Test every live laser against every live enemy, then every live enemy
/// against the hero. Handlers run as each overlap is found, so an entity
/// destroyed earlier in the sweep is skipped by the later checks.
fn detect_collisions(state: &mut GameState) {
    let indices_of = |state: &GameState, kind: EntityKind| -> Vec<usize> {
        state
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is(kind))
            .map(|(i, _)| i)
            .collect()
    };
    let lasers = indices_of(state, EntityKind::Laser);
    let enemies = indices_of(state, EntityKind::Enemy);

    for &li in &lasers {
        for &ei in &enemies {
            let (laser, enemy) = (&state.entities[li], &state.entities[ei]);
            if !(laser.alive && enemy.alive) {
                continue;
            }
            if intersects(&laser.rect(), &enemy.rect()) {
                let hit = Collision::EnemyLaser {
                    laser: laser.id,
                    enemy: enemy.id,
                };
                resolve(state, hit);
            }
        }
    }

    let Some(hi) = state.entities.iter().position(|e| e.id == state.hero_id) else {
        return;
    };
    for &ei in &enemies {
        let (hero, enemy) = (&state.entities[hi], &state.entities[ei]);
        if !(hero.alive && enemy.alive) {
            continue;
        }
        if intersects(&hero.rect(), &enemy.rect()) {
            let hit = Collision::EnemyHero { enemy: enemy.id };
            resolve(state, hit);
        }
    }
}

fn resolve(state: &mut GameState, collision: Collision) {
    log::debug!("Collision: {:?}", collision);
    let event = match collision {
        Collision::EnemyLaser { laser, enemy } => GameEvent::CollisionEnemyLaser { laser, enemy },
        Collision::EnemyHero { enemy } => GameEvent::CollisionEnemyHero { enemy },
    };
    state.raise(event);
}
