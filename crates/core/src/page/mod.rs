//! Page-level wiring.
//!
//! [`Page`] binds the parsed page markup to the interaction components:
//! playable tracks go to the [`PlaybackController`], video cards to the
//! [`VideoModal`], the drawer to [`MobileNav`] and pointer input to the
//! [`CursorFollower`]. Features whose surfaces are missing from the page are
//! left unbound and their events ignored.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    cursor::{CursorFollower, Tween},
    modal::{CloseTrigger, ModalSurface, VideoModal},
    nav::{MobileNav, NavSurface},
    output::OutputHandle,
    playback::{PendingPlay, PlayCompletion, PlaybackController, SessionSnapshot},
    presentation::{Highlight, MetadataUpdate, PresentationSink},
    scroll::{ScrollLock, SmoothScroll},
    viewport::{FixedViewport, Viewport},
    ItemId, MediaStageError, PlayableItem, Result,
};

/// Static description of the page, as found in its markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageManifest {
    pub tracks: Vec<TrackMarkup>,
    /// Whether the page has a now-playing panel (art, title, artist).
    pub player_display: bool,
    pub videos: Vec<VideoCard>,
    pub modal: Option<ModalSurface>,
    pub nav: Option<NavSurface>,
    pub cursor: bool,
}

impl PageManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMarkup {
    pub id: ItemId,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default = "default_play_control")]
    pub play_control: bool,
}

fn default_play_control() -> bool {
    true
}

impl TrackMarkup {
    fn to_item(&self) -> Result<PlayableItem> {
        if !self.play_control {
            return Err(MediaStageError::feature_unavailable(
                "playback control",
                format!("track `{}` has no play control", self.id),
            ));
        }
        let Some(audio) = self.audio.as_deref().filter(|audio| !audio.is_empty()) else {
            return Err(MediaStageError::feature_unavailable(
                "playback control",
                format!("track `{}` has no audio source", self.id),
            ));
        };

        let mut item = PlayableItem::new(self.id.clone(), audio, self.title.clone())
            .with_artist(self.artist.clone());
        item.display_image = self.image.clone();
        Ok(item)
    }

    /// Hover metadata. Every track row has it, bound or not.
    fn preview(&self) -> MetadataUpdate {
        MetadataUpdate {
            image: self.image.clone(),
            title: Some(self.title.clone()),
            artist: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCard {
    pub youtube_id: String,
}

/// Discrete user input delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    PlayClicked { track: ItemId },
    TrackHovered { track: ItemId, viewport_width: u32 },
    VideoCardClicked { youtube_id: String },
    ModalClosed { trigger: CloseTrigger },
    HamburgerClicked,
    NavCloseClicked,
    NavLinkClicked { href: String },
    PointerMoved { x: f32, y: f32 },
    PointerEntered,
    PointerLeft,
    Wheel {
        delta: f32,
        #[serde(default)]
        touch: bool,
    },
    /// Animation frame, `elapsed` seconds after the previous one.
    Frame { elapsed: f32 },
    MediaEnded,
}

/// Observable state of every page component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub playback: SessionSnapshot,
    pub highlighted: Vec<ItemId>,
    pub modal_open: bool,
    pub embed_src: Option<String>,
    pub nav_open: bool,
    pub scroll_stopped: bool,
    pub scroll_position: f32,
    pub cursor_hovered: bool,
}

pub struct Page<O, P, S> {
    config: AppConfig,
    playback: PlaybackController<O, Option<P>>,
    highlights: Vec<(ItemId, Highlight)>,
    previews: HashMap<ItemId, MetadataUpdate>,
    videos: Vec<VideoCard>,
    modal: Option<VideoModal>,
    nav: Option<MobileNav>,
    cursor: Option<CursorFollower>,
    scroll: S,
    tweens: Vec<Tween>,
}

impl<O, P, S> Page<O, P, S>
where
    O: OutputHandle,
    P: PresentationSink,
    S: SmoothScroll,
{
    /// Binds every feature the manifest supports. Missing surfaces disable
    /// their feature without failing the page.
    pub fn mount(
        manifest: PageManifest,
        config: AppConfig,
        output: O,
        presentation: P,
        scroll: S,
    ) -> Self {
        let display = if manifest.player_display {
            Some(presentation)
        } else {
            tracing::debug!("no now-playing display on page");
            None
        };
        let mut playback = PlaybackController::new(output, display);

        let mut highlights = Vec::new();
        let mut previews = HashMap::new();
        for track in &manifest.tracks {
            previews.insert(track.id.clone(), track.preview());
            let highlight = Highlight::new();
            let bound = track
                .to_item()
                .and_then(|item| playback.register_item(item, highlight.clone()));
            match bound {
                Ok(()) => highlights.push((track.id.clone(), highlight)),
                Err(err) if err.is_optional_feature() => {
                    tracing::debug!(track = %track.id, reason = %err, "track not bound")
                }
                Err(err) => tracing::warn!(track = %track.id, error = %err, "track not bound"),
            }
        }

        let modal = manifest.modal.and_then(|surface| optional(VideoModal::mount(surface)));
        let nav = manifest.nav.and_then(|surface| optional(MobileNav::mount(surface)));
        let cursor = manifest
            .cursor
            .then(|| CursorFollower::new(config.cursor.clone()));
        let tweens = cursor
            .as_ref()
            .map(|cursor| vec![cursor.initial_placement()])
            .unwrap_or_default();

        tracing::info!(
            tracks = highlights.len(),
            videos = manifest.videos.len(),
            modal = modal.is_some(),
            nav = nav.is_some(),
            cursor = cursor.is_some(),
            "page mounted"
        );

        Self {
            config,
            playback,
            highlights,
            previews,
            videos: manifest.videos,
            modal,
            nav,
            cursor,
            scroll,
            tweens,
        }
    }

    /// Routes one input event. Returns the pending start when the event
    /// requested playback.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<Option<PendingPlay>> {
        tracing::trace!(?event, "dispatching page event");
        self.playback.reconcile();
        match event {
            PageEvent::PlayClicked { track } => return self.playback.toggle(&track),
            PageEvent::TrackHovered {
                track,
                viewport_width,
            } => {
                if FixedViewport(viewport_width).supports_hover(&self.config.viewport) {
                    self.preview(&track)?;
                }
            }
            PageEvent::VideoCardClicked { youtube_id } => {
                let known = self.videos.iter().any(|card| card.youtube_id == youtube_id);
                if let (true, Some(modal)) = (known, self.modal.as_mut()) {
                    modal.open(&youtube_id, &mut self.scroll);
                }
            }
            PageEvent::ModalClosed { trigger } => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.close(trigger, &mut self.scroll);
                }
            }
            PageEvent::HamburgerClicked => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.open(&mut self.scroll);
                }
            }
            PageEvent::NavCloseClicked => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.close(&mut self.scroll);
                }
            }
            PageEvent::NavLinkClicked { href } => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.follow_link(&href, &mut self.scroll);
                }
            }
            PageEvent::PointerMoved { x, y } => {
                if let Some(cursor) = &self.cursor {
                    self.tweens.push(cursor.pointer_moved(x, y));
                }
            }
            PageEvent::PointerEntered => {
                if let Some(cursor) = self.cursor.as_mut() {
                    self.tweens.push(cursor.pointer_entered());
                }
            }
            PageEvent::PointerLeft => {
                if let Some(cursor) = self.cursor.as_mut() {
                    self.tweens.push(cursor.pointer_left());
                }
            }
            PageEvent::Wheel { delta, touch } => self.scroll.scroll_by(delta, touch),
            PageEvent::Frame { elapsed } => self.scroll.tick(elapsed),
            PageEvent::MediaEnded => {
                self.playback.handle_ended();
            }
        }
        Ok(None)
    }

    pub fn settle(&mut self, completion: PlayCompletion) -> Result<()> {
        self.playback.settle(completion)
    }

    /// Takes the cursor animations queued since the last call.
    pub fn drain_tweens(&mut self) -> Vec<Tween> {
        std::mem::take(&mut self.tweens)
    }

    /// Current state of every component, after syncing playback with the
    /// output.
    pub fn snapshot(&mut self) -> PageSnapshot {
        self.playback.reconcile();
        let modal = self.modal.as_ref();
        PageSnapshot {
            playback: self.playback.current_state(),
            highlighted: self
                .highlights
                .iter()
                .filter(|(_, highlight)| highlight.get())
                .map(|(id, _)| id.clone())
                .collect(),
            modal_open: modal.map(VideoModal::is_active).unwrap_or(false),
            embed_src: modal
                .map(VideoModal::embed_src)
                .filter(|src| !src.is_empty())
                .map(str::to_string),
            nav_open: self.nav.as_ref().map(MobileNav::is_open).unwrap_or(false),
            scroll_stopped: self.scroll.is_stopped(),
            scroll_position: self.scroll.position(),
            cursor_hovered: self
                .cursor
                .as_ref()
                .map(CursorFollower::is_hovered)
                .unwrap_or(false),
        }
    }

    fn preview(&mut self, track: &ItemId) -> Result<()> {
        if self.playback.item(track).is_some() {
            return self.playback.preview_item(track);
        }
        let update = self
            .previews
            .get(track)
            .ok_or_else(|| MediaStageError::UnknownItem(track.clone()))?;
        self.playback.presentation_mut().show(update);
        Ok(())
    }

    pub fn playback(&self) -> &PlaybackController<O, Option<P>> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController<O, Option<P>> {
        &mut self.playback
    }

    /// Now-playing display, if the page has one.
    pub fn display(&self) -> Option<&P> {
        self.playback.presentation().as_ref()
    }

    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn optional<T>(mounted: Result<T>) -> Option<T> {
    match mounted {
        Ok(feature) => Some(feature),
        Err(err) => {
            tracing::debug!(reason = %err, "feature disabled");
            None
        }
    }
}
