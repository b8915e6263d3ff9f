//! Headless presentation: records each frame's draw calls and keeps totals.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use tankduel_core::enums::{TextColor, TextureId};
use tankduel_sim::render::{DrawList, RenderTarget};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frames: u64,
    pub sprites: u64,
    pub texts: u64,
}

/// Render target standing in for a window. Holds the most recent frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frame: DrawList,
    stats: FrameStats,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous frame's calls.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
        self.stats.frames += 1;
    }

    pub fn frame(&self) -> &DrawList {
        &self.frame
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl RenderTarget for FrameRecorder {
    fn draw_sprite(&mut self, texture: TextureId, transform: Affine2) {
        self.stats.sprites += 1;
        self.frame.draw_sprite(texture, transform);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: TextColor) {
        self.stats.texts += 1;
        self.frame.draw_text(text, position, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_replaced_and_stats_accumulate() {
        let mut recorder = FrameRecorder::new();
        recorder.begin_frame();
        recorder.draw_sprite(TextureId::Bullet, Affine2::IDENTITY);
        recorder.draw_text("P1 Health: 100", Vec2::ZERO, TextColor::Blue);

        recorder.begin_frame();
        recorder.draw_sprite(TextureId::Missile, Affine2::IDENTITY);

        assert_eq!(recorder.frame().sprite_count(), 1);
        assert_eq!(recorder.frame().count_texture(TextureId::Missile), 1);
        assert_eq!(
            recorder.stats(),
            FrameStats {
                frames: 2,
                sprites: 2,
                texts: 1,
            }
        );
    }
}
