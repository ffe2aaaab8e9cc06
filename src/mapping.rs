//! Screen position to oscillator parameters.

use crate::config::EnvelopeConfig;
use crate::pos::Pos;

/// Linear rescale of `value` from `[old_min, old_max]` into `[new_min, new_max]`.
pub fn scale(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    value / ((old_max - old_min) / (new_max - new_min)) + new_min
}

/// Window extents in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub gain: f32,
    pub frequency: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Keeps a position inside the window. Drags that leave the window
    /// report coordinates past its edges.
    pub fn clamp(&self, pos: Pos) -> Pos {
        Pos::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// `x` drives amplitude, `y` drives pitch. `pos` must already lie
    /// inside the window, see [`Screen::clamp`].
    pub fn map(&self, pos: Pos, envelope: &EnvelopeConfig) -> Target {
        Target {
            gain: scale(pos.x, 0.0, self.width, 0.0, envelope.max_gain),
            frequency: scale(
                pos.y,
                0.0,
                self.height,
                envelope.min_freq,
                envelope.max_freq,
            ),
        }
    }
}
