use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewport: ViewportConfig,
    pub scroll: ScrollConfig,
    pub carousel: CarouselConfig,
    pub cursor: CursorConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing sections fall back to their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Narrowest surface, in logical pixels, that gets hover previews.
    pub hover_min_width: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            hover_min_width: 768,
        }
    }
}

/// Tuning for the inertial scroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Seconds an inertial scroll takes to settle.
    pub duration: f32,
    pub mouse_multiplier: f32,
    pub touch_multiplier: f32,
    pub smooth_touch: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            mouse_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_touch: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    pub slides_per_view: f32,
    pub space_between: u32,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub layout: SlideLayout,
}

/// Video carousel layout. Breakpoints override the base layout once the
/// viewport reaches their `min_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub base: SlideLayout,
    pub looped: bool,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            base: SlideLayout {
                slides_per_view: 1.2,
                space_between: 20,
                centered: false,
            },
            looped: false,
            breakpoints: vec![Breakpoint {
                min_width: 768,
                layout: SlideLayout {
                    slides_per_view: 3.0,
                    space_between: 30,
                    centered: false,
                },
            }],
        }
    }
}

impl CarouselConfig {
    /// Resolves the layout in effect for a viewport `width`.
    pub fn layout_for(&self, width: u32) -> SlideLayout {
        self.breakpoints
            .iter()
            .filter(|bp| bp.min_width <= width)
            .max_by_key(|bp| bp.min_width)
            .map(|bp| bp.layout)
            .unwrap_or(self.base)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub follow_duration: f32,
    pub follow_ease: String,
    pub hover_scale: f32,
    pub scale_duration: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follow_duration: 0.2,
            follow_ease: "power2.out".to_string(),
            hover_scale: 1.5,
            scale_duration: 0.3,
        }
    }
}
