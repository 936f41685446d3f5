//! Game state and event handling
//!
//! All mutable game data lives in [`GameState`]. Collision and input handlers
//! run through [`GameState::raise`], which queues any follow-up events (win,
//! loss) and handles them in order once the triggering event is done.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Behavior, Entity, EntityKind, HeroStats};
use crate::consts::*;
use crate::events::GameEvent;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Every enemy destroyed
    Won,
    /// Hero ran out of lives
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Running
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Active entities, in spawn order (enemies, hero, lasers)
    pub entities: Vec<Entity>,
    pub hero_id: u32,
    pub hero: HeroStats,
    /// Simulated time (ms)
    pub time_ms: u64,
    /// Events waiting to be handled
    #[serde(skip)]
    pending: VecDeque<GameEvent>,
    /// Handled events, oldest first, not yet collected by the driver
    #[serde(skip)]
    handled: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh game: full enemy grid plus the hero
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            hero: HeroStats::new(settings.starting_life),
            settings,
            phase: GamePhase::Running,
            entities: Vec::new(),
            hero_id: 0,
            time_ms: 0,
            pending: VecDeque::new(),
            handled: Vec::new(),
            next_id: 1,
        };

        state.spawn_enemies();
        state.spawn_hero();

        log::info!(
            "Spawned {} enemies, hero at {:?}",
            state.live_enemy_count(),
            state.hero_entity().map(|h| h.pos)
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out the enemy grid, centered horizontally, column by column
    pub fn spawn_enemies(&mut self) {
        let start_x = (self.settings.canvas_width - self.settings.enemy_grid_width()) / 2.0;
        for col in 0..self.settings.enemy_columns {
            for row in 0..self.settings.enemy_rows {
                let pos = Vec2::new(start_x + col as f32 * ENEMY_WIDTH, row as f32 * ENEMY_HEIGHT);
                self.spawn_enemy(pos);
            }
        }
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let behavior = Behavior::Descend {
            step: self.settings.enemy_step,
            interval_ms: self.settings.enemy_interval_ms,
            elapsed_ms: 0,
            floor: self.settings.canvas_height - ENEMY_HEIGHT,
            halted: false,
        };
        self.entities.push(Entity::new(id, EntityKind::Enemy, pos, behavior));
        id
    }

    /// Place the hero bottom-center
    pub fn spawn_hero(&mut self) -> u32 {
        let id = self.next_entity_id();
        let pos = Vec2::new(
            self.settings.canvas_width / 2.0 - 45.0,
            self.settings.canvas_height - self.settings.canvas_height / 4.0,
        );
        self.entities.push(Entity::new(id, EntityKind::Hero, pos, Behavior::Manual));
        self.hero_id = id;
        id
    }

    pub fn spawn_laser(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let behavior = Behavior::Ascend {
            step: self.settings.laser_step,
            interval_ms: self.settings.laser_interval_ms,
            elapsed_ms: 0,
        };
        self.entities.push(Entity::new(id, EntityKind::Laser, pos, behavior));
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The hero's entity (gone once the hero has died and been purged)
    pub fn hero_entity(&self) -> Option<&Entity> {
        self.entity(self.hero_id)
    }

    pub fn hero_entity_mut(&mut self) -> Option<&mut Entity> {
        let id = self.hero_id;
        self.entity_mut(id)
    }

    pub fn is_hero_dead(&self) -> bool {
        self.hero.life == 0
    }

    pub fn live_enemy_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_live(EntityKind::Enemy))
            .count()
    }

    pub fn are_enemies_dead(&self) -> bool {
        self.live_enemy_count() == 0
    }

    /// Entities still taking part in the game, in draw order
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    /// Drop every dead entity in one pass
    pub fn purge_dead(&mut self) {
        self.entities.retain(|e| e.alive);
    }

    /// Accept a fire request if the cooldown allows it
    pub fn try_fire(&mut self) -> Option<u32> {
        if !self.hero.can_fire() {
            log::trace!("Fire rejected, cooldown {}ms", self.hero.cooldown_ms);
            return None;
        }
        let muzzle = self
            .hero_entity()
            .filter(|h| h.alive)
            .map(|h| h.pos + Vec2::new(LASER_OFFSET_X, LASER_OFFSET_Y))?;

        let laser = self.spawn_laser(muzzle);
        self.hero.start_cooldown(self.settings.fire_cooldown_ms);
        self.raise(GameEvent::LaserFired { laser });
        Some(laser)
    }

    /// Handle `event` and every follow-up it queues, in FIFO order
    pub fn raise(&mut self, event: GameEvent) {
        self.pending.push_back(event);
        while let Some(event) = self.pending.pop_front() {
            self.handled.push(event);
            self.handle(event);
        }
    }

    /// Collect the events handled since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.handled)
    }

    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::CollisionEnemyLaser { laser, enemy } => {
                for id in [laser, enemy] {
                    if let Some(e) = self.entity_mut(id) {
                        e.alive = false;
                    }
                }
                self.hero.add_points(self.settings.points_per_kill);
                self.check_win();
            }
            GameEvent::CollisionEnemyHero { enemy } => {
                if let Some(e) = self.entity_mut(enemy) {
                    e.alive = false;
                }
                if self.hero.lose_life() {
                    if let Some(hero) = self.hero_entity_mut() {
                        hero.alive = false;
                    }
                    // Loss wins over a simultaneous clear
                    self.end(GamePhase::Lost);
                    return;
                }
                self.check_win();
            }
            GameEvent::GameEndWin => {
                log::info!("Game won with {} points", self.hero.points);
            }
            GameEvent::GameEndLoss => {
                log::info!("Game lost with {} points", self.hero.points);
            }
            GameEvent::Input(_) | GameEvent::LaserFired { .. } => {}
        }
    }

    fn check_win(&mut self) {
        if self.are_enemies_dead() {
            self.end(GamePhase::Won);
        }
    }

    /// Enter a terminal phase; only the first one counts
    fn end(&mut self, phase: GamePhase) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = phase;
        self.pending.push_back(match phase {
            GamePhase::Won => GameEvent::GameEndWin,
            _ => GameEvent::GameEndLoss,
        });
    }

    /// Pretty JSON dump for debugging
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
