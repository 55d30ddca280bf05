use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Partial update for the now-playing display. Absent fields keep whatever
/// the display currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub image: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Write-only sink for presentation metadata. The controller never reads it
/// back.
pub trait PresentationSink {
    fn show(&mut self, update: &MetadataUpdate);
}

/// A control bound to one playable item, carrying the "now playing"
/// highlight.
pub trait ControlHandle {
    fn set_highlighted(&mut self, on: bool);
    fn is_highlighted(&self) -> bool;
}

/// Shared highlight flag. Clones observe the same state, so a host can keep
/// one copy after handing another to the controller.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    on: Rc<Cell<bool>>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.on.get()
    }
}

impl ControlHandle for Highlight {
    fn set_highlighted(&mut self, on: bool) {
        self.on.set(on);
    }

    fn is_highlighted(&self) -> bool {
        self.on.get()
    }
}

/// In-memory now-playing panel (album art plus overlay text).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NowPlayingPanel {
    pub image: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl PresentationSink for NowPlayingPanel {
    fn show(&mut self, update: &MetadataUpdate) {
        if let Some(image) = &update.image {
            self.image = Some(image.clone());
        }
        if let Some(title) = &update.title {
            self.title = Some(title.clone());
        }
        if let Some(artist) = &update.artist {
            self.artist = Some(artist.clone());
        }
    }
}

/// A page without a now-playing display drops every update.
impl<T: PresentationSink> PresentationSink for Option<T> {
    fn show(&mut self, update: &MetadataUpdate) {
        if let Some(sink) = self {
            sink.show(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_keeps_fields_missing_from_update() {
        let mut panel = NowPlayingPanel::default();
        panel.show(&MetadataUpdate {
            image: Some("cover.jpg".into()),
            title: Some("First".into()),
            artist: Some("Someone".into()),
        });
        panel.show(&MetadataUpdate {
            image: None,
            title: Some("Second".into()),
            artist: None,
        });

        assert_eq!(panel.image.as_deref(), Some("cover.jpg"));
        assert_eq!(panel.title.as_deref(), Some("Second"));
        assert_eq!(panel.artist.as_deref(), Some("Someone"));
    }

    #[test]
    fn highlight_clones_share_state() {
        let observer = Highlight::new();
        let mut control = observer.clone();

        control.set_highlighted(true);
        assert!(observer.get());
        control.set_highlighted(false);
        assert!(!observer.is_highlighted());
    }

    #[test]
    fn absent_display_ignores_updates() {
        let mut display: Option<NowPlayingPanel> = None;
        display.show(&MetadataUpdate {
            title: Some("Ignored".into()),
            ..Default::default()
        });
        assert!(display.is_none());
    }
}
