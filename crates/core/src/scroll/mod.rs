use crate::config::ScrollConfig;

/// Page scroll that overlays can freeze while they are open.
pub trait ScrollLock {
    fn stop(&mut self);
    fn start(&mut self);
    fn is_stopped(&self) -> bool;
}

/// Scroll engine driven by input deltas and animation frames.
pub trait SmoothScroll: ScrollLock {
    /// Applies a wheel or touch delta. Ignored while stopped.
    fn scroll_by(&mut self, delta: f32, touch: bool);

    /// Advances the running scroll by `elapsed` seconds.
    fn tick(&mut self, elapsed: f32);

    fn position(&self) -> f32;
}

/// Inertial scroll model. Glides from the position at the last input towards
/// the accumulated target along an exponential ease-out.
#[derive(Debug, Clone, Default)]
pub struct InertialScroll {
    config: ScrollConfig,
    stopped: bool,
    position: f32,
    from: f32,
    target: f32,
    elapsed: f32,
}

impl InertialScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Exponential ease-out, clamped to 1.
    pub fn ease(t: f32) -> f32 {
        (1.001 - 2f32.powf(-10.0 * t)).min(1.0)
    }

    /// Eased progress `elapsed` seconds into a scroll.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.config.duration <= 0.0 {
            return 1.0;
        }
        Self::ease((elapsed / self.config.duration).max(0.0))
    }

    /// Position reached `elapsed` seconds into a scroll from `from` to `to`.
    /// A stopped scroll stays where it is.
    pub fn advance(&self, from: f32, to: f32, elapsed: f32) -> f32 {
        if self.stopped {
            return from;
        }
        from + (to - from) * self.progress(elapsed)
    }

    /// Scales a raw wheel or touch delta by the configured multiplier. Touch
    /// deltas are only scaled when touch smoothing is on.
    pub fn scaled_delta(&self, delta: f32, touch: bool) -> f32 {
        match (touch, self.config.smooth_touch) {
            (true, true) => delta * self.config.touch_multiplier,
            (true, false) => delta,
            (false, _) => delta * self.config.mouse_multiplier,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

impl SmoothScroll for InertialScroll {
    fn scroll_by(&mut self, delta: f32, touch: bool) {
        if self.stopped {
            return;
        }
        let delta = self.scaled_delta(delta, touch);
        if touch && !self.config.smooth_touch {
            // Native touch scrolling moves the page directly.
            self.position = (self.position + delta).max(0.0);
            self.from = self.position;
            self.target = self.position;
        } else {
            self.from = self.position;
            self.target = (self.target + delta).max(0.0);
        }
        self.elapsed = 0.0;
    }

    fn tick(&mut self, elapsed: f32) {
        if self.stopped {
            return;
        }
        self.elapsed += elapsed.max(0.0);
        self.position = self.advance(self.from, self.target, self.elapsed);
    }

    fn position(&self) -> f32 {
        self.position
    }
}

impl ScrollLock for InertialScroll {
    fn stop(&mut self) {
        if !self.stopped {
            tracing::debug!("scroll stopped");
        }
        self.stopped = true;
    }

    fn start(&mut self) {
        if self.stopped {
            tracing::debug!("scroll resumed");
        }
        self.stopped = false;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_clamped_and_monotonic() {
        assert!(InertialScroll::ease(0.0).abs() < 0.01);
        assert_eq!(InertialScroll::ease(1.0), 1.0);
        assert_eq!(InertialScroll::ease(3.0), 1.0);

        let mut last = 0.0;
        for step in 0..=20 {
            let value = InertialScroll::ease(step as f32 / 20.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn progress_completes_after_duration() {
        let scroll = InertialScroll::new(ScrollConfig::default());
        assert!(scroll.progress(0.6) < 1.0);
        assert_eq!(scroll.progress(1.2), 1.0);
        assert_eq!(scroll.advance(0.0, 500.0, 1.2), 500.0);
    }

    #[test]
    fn stopped_scroll_does_not_move() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        scroll.stop();
        assert!(scroll.is_stopped());
        assert_eq!(scroll.advance(100.0, 900.0, 5.0), 100.0);

        scroll.start();
        assert!(scroll.advance(100.0, 900.0, 0.3) > 100.0);
    }

    #[test]
    fn touch_is_native_unless_smoothed() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        assert_eq!(scroll.scaled_delta(10.0, true), 10.0);
        assert_eq!(scroll.scaled_delta(10.0, false), 10.0);

        scroll.scroll_by(40.0, true);
        assert_eq!(scroll.position(), 40.0);

        let smooth = InertialScroll::new(ScrollConfig {
            smooth_touch: true,
            ..ScrollConfig::default()
        });
        assert_eq!(smooth.scaled_delta(10.0, true), 20.0);
    }

    #[test]
    fn wheel_glides_to_target() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        scroll.scroll_by(300.0, false);
        assert_eq!(scroll.position(), 0.0);
        assert_eq!(scroll.target(), 300.0);

        scroll.tick(0.3);
        let midway = scroll.position();
        assert!(midway > 0.0 && midway < 300.0);

        scroll.tick(0.9);
        assert_eq!(scroll.position(), 300.0);
    }

    #[test]
    fn stopped_scroll_ignores_input() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        scroll.stop();
        scroll.scroll_by(300.0, false);
        scroll.tick(2.0);
        assert_eq!(scroll.position(), 0.0);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn cannot_scroll_above_top() {
        let mut scroll = InertialScroll::new(ScrollConfig::default());
        scroll.scroll_by(-50.0, false);
        scroll.tick(1.2);
        assert_eq!(scroll.position(), 0.0);
    }
}
