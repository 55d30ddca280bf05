use serde::{Deserialize, Serialize};

use crate::config::CursorConfig;

/// Property a tween drives on the cursor element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum TweenTarget {
    Position { x: f32, y: f32 },
    Scale { value: f32 },
    /// Offset of the element relative to its own size, in percent.
    Anchor { x_percent: f32, y_percent: f32 },
}

/// Fire-and-forget animation request handed to the host's tween engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub target: TweenTarget,
    pub duration: f32,
    pub ease: Option<String>,
}

/// Custom cursor that trails the pointer and grows over interactive
/// elements.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    config: CursorConfig,
    hovered: bool,
}

impl CursorFollower {
    /// Offsets (in percent of the cursor's size) that centre it on the
    /// pointer.
    pub const ANCHOR_PERCENT: (f32, f32) = (-50.0, -50.0);

    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            hovered: false,
        }
    }

    /// Zero-duration placement that centres the cursor on the pointer.
    pub fn initial_placement(&self) -> Tween {
        let (x_percent, y_percent) = Self::ANCHOR_PERCENT;
        Tween {
            target: TweenTarget::Anchor {
                x_percent,
                y_percent,
            },
            duration: 0.0,
            ease: None,
        }
    }

    pub fn pointer_moved(&self, x: f32, y: f32) -> Tween {
        Tween {
            target: TweenTarget::Position { x, y },
            duration: self.config.follow_duration,
            ease: Some(self.config.follow_ease.clone()),
        }
    }

    pub fn pointer_entered(&mut self) -> Tween {
        self.hovered = true;
        self.scale_to(self.config.hover_scale)
    }

    pub fn pointer_left(&mut self) -> Tween {
        self.hovered = false;
        self.scale_to(1.0)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn scale_to(&self, value: f32) -> Tween {
        Tween {
            target: TweenTarget::Scale { value },
            duration: self.config.scale_duration,
            ease: None,
        }
    }
}
