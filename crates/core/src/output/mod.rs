use std::collections::HashSet;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::OutputError;

/// Pending playback start. Resolves once the host knows whether sound is
/// actually coming out.
pub type PlayFuture = LocalBoxFuture<'static, Result<(), OutputError>>;

/// The single shared audio output. Only the playback controller drives it.
pub trait OutputHandle {
    /// Replaces the current source. Position restarts from the top.
    fn load(&mut self, uri: &str);

    /// Requests playback of the loaded source.
    fn play(&mut self) -> PlayFuture;

    fn pause(&mut self);

    /// Authoritative playing/paused fact.
    fn is_paused(&self) -> bool;

    fn source(&self) -> Option<&str>;
}

/// In-process output used by the command line driver and tests. Starts
/// resolve immediately; individual sources or all starts can be made to fail.
#[derive(Debug)]
pub struct SimulatedOutput {
    source: Option<String>,
    paused: bool,
    autoplay_blocked: bool,
    unavailable: HashSet<String>,
    started: usize,
}

impl Default for SimulatedOutput {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            autoplay_blocked: false,
            unavailable: HashSet::new(),
            started: 0,
        }
    }
}

impl SimulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `uri` as unplayable.
    pub fn reject(&mut self, uri: impl Into<String>) {
        self.unavailable.insert(uri.into());
    }

    pub fn block_autoplay(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// Simulates the loaded source reaching its end.
    pub fn finish(&mut self) {
        self.paused = true;
    }

    /// Number of starts that actually produced sound.
    pub fn started(&self) -> usize {
        self.started
    }

    fn check_start(&self) -> Result<(), OutputError> {
        let Some(source) = &self.source else {
            return Err(OutputError::SourceUnavailable(String::new()));
        };
        if self.autoplay_blocked {
            return Err(OutputError::NotAllowed);
        }
        if self.unavailable.contains(source) {
            return Err(OutputError::SourceUnavailable(source.clone()));
        }
        Ok(())
    }
}

impl OutputHandle for SimulatedOutput {
    fn load(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.paused = true;
    }

    fn play(&mut self) -> PlayFuture {
        let outcome = self.check_start();
        if outcome.is_ok() {
            self.paused = false;
            self.started += 1;
        }
        future::ready(outcome).boxed_local()
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
