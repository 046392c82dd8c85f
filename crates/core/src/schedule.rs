//! When to recompute the showcase: at most once per rendered frame, plus a
//! once-a-second tick so the clock stays live without scrolling.

/// Seconds between synthetic recomputes.
pub const TICK_INTERVAL: f64 = 1.0;

/// Coalesces bursts of scroll events into one recompute per frame. Requests
/// arriving while one is pending are dropped, not queued.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Returns `true` when this call scheduled a recompute.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called once per frame; returns whether a recompute is due.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Fixed-interval timer fed with wall-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTimer {
    interval: f64,
    last_tick: Option<f64>,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TickTimer {
    pub const fn new(interval: f64) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns `true` when an interval has elapsed since the last tick. The
    /// first poll only starts the clock; time going backwards restarts it.
    pub fn poll(&mut self, now_seconds: f64) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now_seconds);
            return false;
        };

        if now_seconds < last {
            self.last_tick = Some(now_seconds);
            return false;
        }

        if now_seconds - last >= self.interval {
            self.last_tick = Some(now_seconds);
            return true;
        }

        false
    }
}

/// Whether any part of a section lies within the viewport.
pub fn intersects_viewport(top: f64, height: f64, viewport_height: f64) -> bool {
    top < viewport_height && top + height > 0.0
}

/// Share of a section's height inside the viewport, with the viewport's
/// bottom edge pulled up by `bottom_margin`.
pub fn visible_fraction(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let visible_top = top.max(0.0);
    let visible_bottom = (top + height).min(viewport_height - bottom_margin);
    ((visible_bottom - visible_top) / height).clamp(0.0, 1.0)
}

pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Sections that have been scrolled into view at least once. Once revealed a
/// section stays revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    revealed: Vec<bool>,
}

impl Reveal {
    pub fn new(sections: usize) -> Self {
        Self {
            revealed: vec![false; sections],
        }
    }

    /// Marks the section revealed if enough of it is visible. `bottom_margin`
    /// is in the caller's unit.
    pub fn observe(&mut self, index: usize, top: f64, height: f64, viewport_height: f64, bottom_margin: f64) {
        let Some(flag) = self.revealed.get_mut(index) else {
            return;
        };
        if !*flag && visible_fraction(top, height, viewport_height, bottom_margin) >= REVEAL_THRESHOLD {
            *flag = true;
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_drops_requests_while_pending() {
        let mut gate = FrameGate::new();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(!gate.request());
        assert!(gate.take());
        assert!(!gate.take());
        assert!(gate.request());
        assert!(gate.is_pending());
    }

    #[test]
    fn first_poll_starts_the_clock() {
        let mut timer = TickTimer::default();
        assert!(!timer.poll(10.0));
        assert!(!timer.poll(10.5));
        assert!(timer.poll(11.0));
        assert!(!timer.poll(11.9));
        assert!(timer.poll(12.2));
    }

    #[test]
    fn backwards_time_restarts_the_timer() {
        let mut timer = TickTimer::default();
        timer.poll(10.0);
        assert!(!timer.poll(5.0));
        assert!(!timer.poll(5.5));
        assert!(timer.poll(6.0));
    }

    #[test]
    fn viewport_intersection() {
        assert!(intersects_viewport(0.0, 100.0, 50.0));
        assert!(intersects_viewport(-90.0, 100.0, 50.0));
        assert!(!intersects_viewport(-100.0, 100.0, 50.0));
        assert!(!intersects_viewport(50.0, 100.0, 50.0));
    }

    #[test]
    fn reveal_is_sticky() {
        let mut reveal = Reveal::new(2);
        reveal.observe(0, 930.0, 400.0, 1000.0, 50.0);
        assert!(!reveal.is_revealed(0));

        reveal.observe(0, 800.0, 400.0, 1000.0, 50.0);
        assert!(reveal.is_revealed(0));

        reveal.observe(0, 5000.0, 400.0, 1000.0, 50.0);
        assert!(reveal.is_revealed(0));
        assert!(!reveal.is_revealed(1));
        assert!(!reveal.is_revealed(7));
    }

    #[test]
    fn visible_fraction_bounds() {
        assert!((visible_fraction(0.0, 100.0, 1000.0, 0.0) - 1.0).abs() < 1e-9);
        assert!((visible_fraction(-50.0, 100.0, 1000.0, 0.0) - 0.5).abs() < 1e-9);
        assert!(visible_fraction(2000.0, 100.0, 1000.0, 0.0).abs() < 1e-9);
        assert!(visible_fraction(0.0, 0.0, 1000.0, 0.0).abs() < 1e-9);
    }
}
