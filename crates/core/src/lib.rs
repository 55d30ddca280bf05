//! Core library for the Media Stage page interaction layer.
//!
//! The centre of the crate is [`PlaybackController`], which guarantees that at
//! most one track on the page plays at a time and that the highlighted
//! control always matches what the shared output is doing. The remaining
//! modules model the page's smaller interaction islands (video modal, mobile
//! navigation, custom cursor, carousel layout and inertial scroll) and the
//! [`Page`] adapter that binds all of them to the page markup.

pub mod catalog;
pub mod config;
pub mod cursor;
pub mod error;
pub mod modal;
pub mod nav;
pub mod output;
pub mod page;
pub mod playback;
pub mod presentation;
pub mod scroll;
pub mod viewport;

pub use catalog::{ItemId, PlayableItem};
pub use config::{
    AppConfig, CarouselConfig, CursorConfig, ScrollConfig, SlideLayout, ViewportConfig,
};
pub use cursor::{CursorFollower, Tween, TweenTarget};
pub use error::{MediaStageError, OutputError, Result};
pub use modal::{CloseTrigger, ModalSurface, VideoModal};
pub use nav::{MobileNav, NavSurface};
pub use output::{OutputHandle, PlayFuture, SimulatedOutput};
pub use page::{Page, PageEvent, PageManifest, PageSnapshot};
pub use playback::{
    PendingPlay, PlayCompletion, PlayTicket, PlaybackController, SessionSnapshot,
};
pub use presentation::{
    ControlHandle, Highlight, MetadataUpdate, NowPlayingPanel, PresentationSink,
};
pub use scroll::{InertialScroll, ScrollLock, SmoothScroll};
pub use viewport::{FixedViewport, Viewport};
