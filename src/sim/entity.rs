//! Entities and their movement behaviors
//!
//! Every simulated object is an [`Entity`]: a rectangle with a liveness flag
//! and a kind tag. Movement that used to run on free-standing timers is an
//! explicit [`Behavior`] advanced by the central tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hero,
    Enemy,
    Laser,
}

impl EntityKind {
    /// Sprite size for this kind
    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Hero => Vec2::new(HERO_WIDTH, HERO_HEIGHT),
            EntityKind::Enemy => Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            EntityKind::Laser => Vec2::new(LASER_WIDTH, LASER_HEIGHT),
        }
    }
}

/// How an entity moves on its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Only moves in response to input
    Manual,
    /// Drops `step` every `interval_ms` until it reaches `floor`, then halts for good
    Descend {
        step: f32,
        interval_ms: u32,
        elapsed_ms: u32,
        floor: f32,
        halted: bool,
    },
    /// Climbs `step` every `interval_ms`; dies once it has reached the top
    Ascend {
        step: f32,
        interval_ms: u32,
        elapsed_ms: u32,
    },
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub behavior: Behavior,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, behavior: Behavior) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            alive: true,
            behavior,
        }
    }

    /// Bounding rectangle for overlap tests
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind == kind
    }

    /// Whether the entity is a live member of `kind`
    pub fn is_live(&self, kind: EntityKind) -> bool {
        self.alive && self.kind == kind
    }

    /// Advance the entity's own movement by `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) {
        match &mut self.behavior {
            Behavior::Manual => {}
            Behavior::Descend {
                step,
                interval_ms,
                elapsed_ms,
                floor,
                halted,
            } => {
                if *halted {
                    return;
                }
                *elapsed_ms += dt_ms;
                while *elapsed_ms >= *interval_ms {
                    *elapsed_ms -= *interval_ms;
                    if self.pos.y < *floor {
                        self.pos.y += *step;
                    } else {
                        log::debug!("Enemy {} stopped at {}", self.id, self.pos.y);
                        *halted = true;
                        break;
                    }
                }
            }
            Behavior::Ascend {
                step,
                interval_ms,
                elapsed_ms,
            } => {
                *elapsed_ms += dt_ms;
                while self.alive && *elapsed_ms >= *interval_ms {
                    *elapsed_ms -= *interval_ms;
                    if self.pos.y > 0.0 {
                        self.pos.y -= *step;
                    } else {
                        self.alive = false;
                    }
                }
            }
        }
    }
}

/// Hero state that outlives the hero's entity (HUD keeps reading it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStats {
    pub life: u32,
    pub points: u64,
    /// Remaining fire cooldown (ms)
    pub cooldown_ms: u32,
    /// Time accumulated toward the next cooldown decay step
    #[serde(default)]
    pub cooldown_elapsed_ms: u32,
}

impl HeroStats {
    pub fn new(life: u32) -> Self {
        Self {
            life,
            points: 0,
            cooldown_ms: 0,
            cooldown_elapsed_ms: 0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_ms == 0
    }

    /// Start a fresh cooldown after a shot
    pub fn start_cooldown(&mut self, cooldown_ms: u32) {
        self.cooldown_ms = cooldown_ms;
        self.cooldown_elapsed_ms = 0;
    }

    /// Decay the cooldown by `decay_ms` every `interval_ms`
    pub fn decay_cooldown(&mut self, dt_ms: u32, decay_ms: u32, interval_ms: u32) {
        if self.cooldown_ms == 0 {
            return;
        }
        self.cooldown_elapsed_ms += dt_ms;
        while self.cooldown_ms > 0 && self.cooldown_elapsed_ms >= interval_ms {
            self.cooldown_elapsed_ms -= interval_ms;
            self.cooldown_ms = self.cooldown_ms.saturating_sub(decay_ms);
        }
        if self.cooldown_ms == 0 {
            self.cooldown_elapsed_ms = 0;
        }
    }

    /// Lose a life; returns true when none are left
    pub fn lose_life(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life == 0
    }

    pub fn add_points(&mut self, points: u64) {
        self.points += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(y: f32, floor: f32) -> Entity {
        Entity::new(
            1,
            EntityKind::Enemy,
            Vec2::new(0.0, y),
            Behavior::Descend {
                step: 5.0,
                interval_ms: 300,
                elapsed_ms: 0,
                floor,
                halted: false,
            },
        )
    }

    fn laser_at(y: f32) -> Entity {
        Entity::new(
            2,
            EntityKind::Laser,
            Vec2::new(0.0, y),
            Behavior::Ascend {
                step: 15.0,
                interval_ms: 100,
                elapsed_ms: 0,
            },
        )
    }

    #[test]
    fn test_sizes_fixed_per_kind() {
        assert_eq!(EntityKind::Hero.size(), Vec2::new(99.0, 75.0));
        assert_eq!(EntityKind::Enemy.size(), Vec2::new(98.0, 50.0));
        assert_eq!(EntityKind::Laser.size(), Vec2::new(9.0, 33.0));
    }

    #[test]
    fn test_enemy_steps_on_interval() {
        let mut enemy = enemy_at(0.0, 700.0);
        enemy.advance(100);
        enemy.advance(100);
        assert_eq!(enemy.pos.y, 0.0);
        enemy.advance(100);
        assert_eq!(enemy.pos.y, 5.0);
        enemy.advance(600);
        assert_eq!(enemy.pos.y, 15.0);
    }

    #[test]
    fn test_enemy_halts_at_floor() {
        let mut enemy = enemy_at(695.0, 700.0);
        enemy.advance(300);
        assert_eq!(enemy.pos.y, 700.0);
        enemy.advance(300);
        assert!(matches!(enemy.behavior, Behavior::Descend { halted: true, .. }));
        enemy.advance(3000);
        assert_eq!(enemy.pos.y, 700.0);
        assert!(enemy.alive);
    }

    #[test]
    fn test_laser_dies_at_top() {
        let mut laser = laser_at(20.0);
        laser.advance(100);
        assert_eq!(laser.pos.y, 5.0);
        laser.advance(100);
        assert_eq!(laser.pos.y, -10.0);
        assert!(laser.alive);
        laser.advance(100);
        assert!(!laser.alive);
    }

    #[test]
    fn test_cooldown_decay() {
        let mut stats = HeroStats::new(3);
        assert!(stats.can_fire());
        stats.start_cooldown(500);
        assert!(!stats.can_fire());

        stats.decay_cooldown(100, 100, 200);
        assert_eq!(stats.cooldown_ms, 500);
        stats.decay_cooldown(100, 100, 200);
        assert_eq!(stats.cooldown_ms, 400);
        stats.decay_cooldown(800, 100, 200);
        assert_eq!(stats.cooldown_ms, 0);
        assert!(stats.can_fire());
        assert_eq!(stats.cooldown_elapsed_ms, 0);
    }

    #[test]
    fn test_lose_life() {
        let mut stats = HeroStats::new(2);
        assert!(!stats.lose_life());
        assert!(stats.lose_life());
        assert!(stats.lose_life());
        assert_eq!(stats.life, 0);
    }
}
