use serde::{Deserialize, Serialize};

use crate::{scroll::ScrollLock, MediaStageError, Result};

const EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Surfaces the page provides for the video modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSurface {
    pub container: bool,
    pub player_frame: bool,
    pub close_button: bool,
    pub overlay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseTrigger {
    CloseButton,
    Overlay,
}

/// Autoplaying embed for a video id.
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_BASE}/{video_id}?autoplay=1")
}

/// Modal that plays an embedded video over the page and freezes scrolling
/// while open.
#[derive(Debug, Clone)]
pub struct VideoModal {
    surface: ModalSurface,
    active: bool,
    embed_src: String,
}

impl VideoModal {
    /// Requires both the modal container and the player frame.
    pub fn mount(surface: ModalSurface) -> Result<Self> {
        if !surface.container || !surface.player_frame {
            return Err(MediaStageError::feature_unavailable(
                "video modal",
                "modal container or player frame missing",
            ));
        }
        Ok(Self {
            surface,
            active: false,
            embed_src: String::new(),
        })
    }

    pub fn open(&mut self, video_id: &str, scroll: &mut dyn ScrollLock) {
        self.embed_src = embed_url(video_id);
        self.active = true;
        scroll.stop();
        tracing::debug!(video_id, "video modal opened");
    }

    /// Closes the modal if `trigger` exists on the page. Returns whether the
    /// trigger was handled.
    pub fn close(&mut self, trigger: CloseTrigger, scroll: &mut dyn ScrollLock) -> bool {
        let bound = match trigger {
            CloseTrigger::CloseButton => self.surface.close_button,
            CloseTrigger::Overlay => self.surface.overlay,
        };
        if !bound {
            return false;
        }

        self.active = false;
        // Clearing the source stops the embedded player.
        self.embed_src.clear();
        scroll.start();
        tracing::debug!(?trigger, "video modal closed");
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn embed_src(&self) -> &str {
        &self.embed_src
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScrollConfig, scroll::InertialScroll};

    fn full_surface() -> ModalSurface {
        ModalSurface {
            container: true,
            player_frame: true,
            close_button: true,
            overlay: true,
        }
    }

    #[test]
    fn opening_sets_embed_and_locks_scroll() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        let mut modal = VideoModal::mount(full_surface()).unwrap();

        modal.open("dQw4w9WgXcQ", &mut scroll);

        assert!(modal.is_active());
        assert_eq!(
            modal.embed_src(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"
        );
        assert!(scroll.is_stopped());
    }

    #[test]
    fn overlay_click_closes_and_clears_source() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        let mut modal = VideoModal::mount(full_surface()).unwrap();
        modal.open("abc", &mut scroll);

        assert!(modal.close(CloseTrigger::Overlay, &mut scroll));
        assert!(!modal.is_active());
        assert!(modal.embed_src().is_empty());
        assert!(!scroll.is_stopped());
    }

    #[test]
    fn missing_close_button_is_ignored() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        let mut modal = VideoModal::mount(ModalSurface {
            close_button: false,
            ..full_surface()
        })
        .unwrap();
        modal.open("abc", &mut scroll);

        assert!(!modal.close(CloseTrigger::CloseButton, &mut scroll));
        assert!(modal.is_active());
        assert!(scroll.is_stopped());
    }

    #[test]
    fn needs_player_frame() {
        let err = VideoModal::mount(ModalSurface {
            player_frame: false,
            ..full_surface()
        })
        .unwrap_err();
        assert!(err.is_optional_feature());
    }
}
