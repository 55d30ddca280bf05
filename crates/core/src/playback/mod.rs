//! Single-active-media playback.
//!
//! [`PlaybackController`] owns the one shared [`OutputHandle`], the registry
//! of playable items and their controls, and the active-item pointer. At most
//! one control carries the "now playing" highlight, and only while the
//! session is actually playing.
//!
//! Starting playback is asynchronous on the output side. [`toggle`] applies
//! the new state immediately and hands back a [`PendingPlay`]; the host
//! awaits it and feeds the [`PlayCompletion`] to [`settle`], which rolls the
//! session back to idle if the start failed. Every transition stamps a new
//! ticket so completions for superseded starts are dropped.
//!
//! [`toggle`]: PlaybackController::toggle
//! [`settle`]: PlaybackController::settle

use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::{
    output::{OutputHandle, PlayFuture},
    presentation::{ControlHandle, PresentationSink},
    ItemId, MediaStageError, OutputError, PlayableItem, Result,
};

/// Identifies one playback start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket(u64);

/// A start request whose outcome the output handle has not reported yet.
pub struct PendingPlay {
    ticket: PlayTicket,
    item: ItemId,
    start: PlayFuture,
}

impl PendingPlay {
    pub fn ticket(&self) -> PlayTicket {
        self.ticket
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Waits for the output handle to report whether playback began.
    pub async fn wait(self) -> PlayCompletion {
        let result = self.start.await;
        PlayCompletion {
            ticket: self.ticket,
            item: self.item,
            result,
        }
    }
}

impl fmt::Debug for PendingPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingPlay")
            .field("ticket", &self.ticket)
            .field("item", &self.item)
            .finish()
    }
}

/// Outcome of a [`PendingPlay`], ready to be handed to
/// [`PlaybackController::settle`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayCompletion {
    pub ticket: PlayTicket,
    pub item: ItemId,
    pub result: std::result::Result<(), OutputError>,
}

/// Read-only view of the session for outside observers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub active_item: Option<ItemId>,
    pub is_playing: bool,
}

impl SessionSnapshot {
    /// The item producing sound, if any.
    pub fn playing(&self) -> Option<&ItemId> {
        if self.is_playing {
            self.active_item.as_ref()
        } else {
            None
        }
    }
}

struct Entry {
    item: PlayableItem,
    control: Box<dyn ControlHandle>,
}

pub struct PlaybackController<O, P> {
    output: O,
    presentation: P,
    entries: HashMap<ItemId, Entry>,
    order: Vec<ItemId>,
    active: Option<ItemId>,
    is_playing: bool,
    generation: u64,
}

impl<O: OutputHandle, P: PresentationSink> PlaybackController<O, P> {
    pub fn new(output: O, presentation: P) -> Self {
        Self {
            output,
            presentation,
            entries: HashMap::new(),
            order: Vec::new(),
            active: None,
            is_playing: false,
            generation: 0,
        }
    }

    /// Binds `control` to `item`. Each id may be registered once; items
    /// without an audio source cannot be bound.
    pub fn register_item(
        &mut self,
        item: PlayableItem,
        control: impl ControlHandle + 'static,
    ) -> Result<()> {
        if self.entries.contains_key(&item.id) {
            return Err(MediaStageError::DuplicateItem(item.id));
        }
        if item.audio_source.trim().is_empty() {
            return Err(MediaStageError::feature_unavailable(
                "playback control",
                format!("item `{}` has no audio source", item.id),
            ));
        }

        let mut control: Box<dyn ControlHandle> = Box::new(control);
        control.set_highlighted(false);

        tracing::debug!(
            item = %item.id,
            source = %item.audio_source,
            "registered playable item"
        );
        self.order.push(item.id.clone());
        self.entries.insert(item.id.clone(), Entry { item, control });
        Ok(())
    }

    /// Shows `id`'s art and title without touching playback.
    pub fn preview_item(&mut self, id: &ItemId) -> Result<()> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| MediaStageError::UnknownItem(id.clone()))?;
        self.presentation.show(&entry.item.preview());
        Ok(())
    }

    /// Activates `id`'s control.
    ///
    /// Stops `id` if it is the one playing. Otherwise stops whatever plays,
    /// loads `id` from the top and requests a start, returning the pending
    /// request.
    pub fn toggle(&mut self, id: &ItemId) -> Result<Option<PendingPlay>> {
        if !self.entries.contains_key(id) {
            return Err(MediaStageError::UnknownItem(id.clone()));
        }

        if self.is_sounding(id) {
            self.stop_current();
            tracing::debug!(item = %id, "stopped playback");
            return Ok(None);
        }

        // Clears the previous highlight before the next one is set.
        if self.is_playing {
            self.stop_current();
        }

        let Some(entry) = self.entries.get_mut(id) else {
            return Err(MediaStageError::UnknownItem(id.clone()));
        };
        self.output.load(&entry.item.audio_source);
        let start = self.output.play();
        entry.control.set_highlighted(true);
        self.presentation.show(&entry.item.now_playing());
        tracing::debug!(item = %id, source = %entry.item.audio_source, "requested playback");

        self.active = Some(id.clone());
        self.is_playing = true;
        let ticket = self.next_ticket();

        Ok(Some(PendingPlay {
            ticket,
            item: id.clone(),
            start,
        }))
    }

    /// Applies the outcome of a start request. Completions for superseded
    /// requests are ignored.
    pub fn settle(&mut self, completion: PlayCompletion) -> Result<()> {
        if completion.ticket != PlayTicket(self.generation) {
            tracing::debug!(item = %completion.item, "ignoring superseded playback start");
            return Ok(());
        }

        match completion.result {
            Ok(()) => {
                tracing::debug!(item = %completion.item, "playback started");
                Ok(())
            }
            Err(source) => {
                tracing::error!(item = %completion.item, error = %source, "playback failed");
                if let Some(entry) = self.entries.get_mut(&completion.item) {
                    entry.control.set_highlighted(false);
                }
                self.is_playing = false;
                self.next_ticket();
                Err(MediaStageError::PlaybackUnavailable {
                    item: completion.item,
                    source,
                })
            }
        }
    }

    /// The output reached the end of the active source. Returns `true` if the
    /// session was playing.
    pub fn handle_ended(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        if let Some(id) = &self.active {
            tracing::debug!(item = %id, "playback ended");
        }
        self.stop_current();
        true
    }

    /// Brings the session in line with the output after it stopped on its
    /// own. Clears the stale highlight and returns `true` if anything
    /// changed. A pending start keeps its ticket so its outcome is still
    /// reported by [`settle`](Self::settle).
    pub fn reconcile(&mut self) -> bool {
        if !self.is_playing || !self.output.is_paused() {
            return false;
        }
        if let Some(entry) = self.active.as_ref().and_then(|id| self.entries.get_mut(id)) {
            tracing::debug!(item = %entry.item.id, "output stopped on its own");
            entry.control.set_highlighted(false);
        }
        self.is_playing = false;
        true
    }

    /// The output decides whether the session is playing.
    pub fn current_state(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_item: self.active.clone(),
            is_playing: self.is_playing && !self.output.is_paused(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&PlayableItem> {
        self.entries.get(id).map(|entry| &entry.item)
    }

    /// Registered items in registration order.
    pub fn items(&self) -> impl Iterator<Item = &PlayableItem> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| &entry.item))
    }

    pub fn is_highlighted(&self, id: &ItemId) -> bool {
        self.entries
            .get(id)
            .map(|entry| entry.control.is_highlighted())
            .unwrap_or(false)
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    fn is_sounding(&self, id: &ItemId) -> bool {
        self.is_playing && self.active.as_ref() == Some(id) && !self.output.is_paused()
    }

    fn stop_current(&mut self) {
        if let Some(entry) = self.active.as_ref().and_then(|id| self.entries.get_mut(id)) {
            entry.control.set_highlighted(false);
        }
        self.output.pause();
        self.is_playing = false;
        self.next_ticket();
    }

    fn next_ticket(&mut self) -> PlayTicket {
        self.generation += 1;
        PlayTicket(self.generation)
    }
}

impl<O, P> fmt::Debug for PlaybackController<O, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("items", &self.order)
            .field("active", &self.active)
            .field("is_playing", &self.is_playing)
            .finish()
    }
}
