use serde::{Deserialize, Serialize};

use crate::{scroll::ScrollLock, MediaStageError, Result};

/// Surfaces the page provides for the mobile navigation drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSurface {
    pub hamburger: bool,
    pub drawer: bool,
    pub close_button: bool,
    pub links: Vec<String>,
}

/// Slide-in navigation drawer for narrow screens.
#[derive(Debug, Clone)]
pub struct MobileNav {
    surface: NavSurface,
    open: bool,
}

impl MobileNav {
    pub fn mount(surface: NavSurface) -> Result<Self> {
        if !surface.hamburger || !surface.drawer {
            return Err(MediaStageError::feature_unavailable(
                "mobile nav",
                "hamburger or drawer missing",
            ));
        }
        Ok(Self {
            surface,
            open: false,
        })
    }

    pub fn open(&mut self, scroll: &mut dyn ScrollLock) {
        self.open = true;
        scroll.stop();
        tracing::debug!("mobile nav opened");
    }

    /// Close control clicked. Ignored when the page has no close control.
    pub fn close(&mut self, scroll: &mut dyn ScrollLock) -> bool {
        if !self.surface.close_button {
            return false;
        }
        self.dismiss(scroll);
        true
    }

    /// A link inside the drawer was followed.
    pub fn follow_link(&mut self, href: &str, scroll: &mut dyn ScrollLock) -> bool {
        if !self.surface.links.iter().any(|link| link == href) {
            return false;
        }
        tracing::debug!(href, "mobile nav link followed");
        self.dismiss(scroll);
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn dismiss(&mut self, scroll: &mut dyn ScrollLock) {
        self.open = false;
        scroll.start();
    }
}
