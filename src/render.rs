//! Render command list
//!
//! The simulation never touches pixels. Each drawn tick it hands the host a
//! list of [`RenderCommand`]s; the host maps [`Sprite`] keys to its own
//! loaded images and draws them in order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityKind, GamePhase, GameState};

/// RGBA color
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Color = [0.0, 0.5, 0.0, 1.0];

/// HUD font size (px)
pub const HUD_FONT_PX: f32 = 30.0;

pub const WIN_MESSAGE: &str = "YOU WON! - Press [Enter] to start a new game";
pub const LOSS_MESSAGE: &str = "YOU DIED! - Press [Enter] to start a new game";

/// Image keys, resolved to loaded textures by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Hero,
    Enemy,
    Laser,
    Life,
}

impl From<EntityKind> for Sprite {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Hero => Sprite::Hero,
            EntityKind::Enemy => Sprite::Enemy,
            EntityKind::Laser => Sprite::Laser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill the whole canvas
    Clear { color: Color },
    /// Draw a sprite; `size` of `None` means the image's natural size
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: Option<Vec2>,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Color,
        font_px: f32,
        align: TextAlign,
    },
}

/// Frame for a running game: background, HUD, then every live entity
pub fn draw(state: &GameState) -> Vec<RenderCommand> {
    let (width, height) = (state.settings.canvas_width, state.settings.canvas_height);
    let mut commands = Vec::with_capacity(state.entities.len() + 8);

    commands.push(RenderCommand::Clear { color: BLACK });

    // Points
    commands.push(RenderCommand::Text {
        text: format!("Points: {}", state.hero.points),
        pos: Vec2::new(10.0, height - 20.0),
        color: RED,
        font_px: HUD_FONT_PX,
        align: TextAlign::Left,
    });

    // Life icons, bottom right
    let start_x = width - 180.0;
    for i in 0..state.hero.life {
        commands.push(RenderCommand::Sprite {
            sprite: Sprite::Life,
            pos: Vec2::new(start_x + 45.0 * (i + 1) as f32, height - 37.0),
            size: None,
        });
    }

    commands.extend(state.live_entities().map(|e| RenderCommand::Sprite {
        sprite: e.kind.into(),
        pos: e.pos,
        size: Some(e.size),
    }));

    commands
}

/// End screen for a finished game; `None` while the game is running
pub fn end_screen(state: &GameState) -> Option<Vec<RenderCommand>> {
    let (message, color) = match state.phase {
        GamePhase::Running => return None,
        GamePhase::Won => (WIN_MESSAGE, GREEN),
        GamePhase::Lost => (LOSS_MESSAGE, RED),
    };

    Some(vec![
        RenderCommand::Clear { color: BLACK },
        RenderCommand::Text {
            text: message.to_string(),
            pos: Vec2::new(state.settings.canvas_width / 2.0, state.settings.canvas_height / 2.0),
            color,
            font_px: HUD_FONT_PX,
            align: TextAlign::Center,
        },
    ])
}
