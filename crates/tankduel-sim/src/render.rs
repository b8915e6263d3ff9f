//! Drawing seam between the simulation and whatever presents it.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use tankduel_core::enums::{TextColor, TextureId};

/// Anything that can receive sprites and text for one frame.
pub trait RenderTarget {
    fn draw_sprite(&mut self, texture: TextureId, transform: Affine2);
    fn draw_text(&mut self, text: &str, position: Vec2, color: TextColor);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCall {
    Sprite {
        texture: TextureId,
        position: Vec2,
        /// Column vectors of the linear part.
        matrix: [f32; 4],
    },
    Text {
        text: String,
        position: Vec2,
        color: TextColor,
    },
}

/// Render target that records draw calls in submission order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite { .. }))
            .count()
    }

    pub fn count_texture(&self, texture: TextureId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite { texture: t, .. } if *t == texture))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            DrawCall::Sprite { .. } => None,
        })
    }
}

impl RenderTarget for DrawList {
    fn draw_sprite(&mut self, texture: TextureId, transform: Affine2) {
        self.calls.push(DrawCall::Sprite {
            texture,
            position: transform.translation,
            matrix: transform.matrix2.to_cols_array(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: TextColor) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            position,
            color,
        });
    }
}
