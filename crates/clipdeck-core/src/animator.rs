//! Wheel smoothing for a scrollable surface.
//!
//! Discrete wheel deltas move a `target`; a per-frame loop eases the
//! rendered `offset` toward it by a fixed fraction of the remaining
//! distance and snaps once it is close. Bursts of wheel events only move the
//! target, so a single loop absorbs them. Programmatic requests write the
//! same target, so the latest request always wins.

use crate::config::ScrollConfig;
use crate::frame::FrameToken;
use crate::traits::FrameScheduler;
use serde::{Deserialize, Serialize};

/// Unit of a raw wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollState {
    pub offset: f64,
    pub target: f64,
    pub content_extent: f64,
    pub container_extent: f64,
}

impl ScrollState {
    /// Largest reachable offset. An unmeasured or degenerate surface has
    /// nothing to scroll.
    pub fn max_scroll(&self) -> f64 {
        let max = self.content_extent - self.container_extent;
        if max.is_finite() && max > 0.0 {
            max
        } else {
            0.0
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max_scroll())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Converging(FrameToken),
}

/// What a delivered frame did to the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub offset: f64,
    pub settled: bool,
}

/// Converging scroll animation for one surface.
///
/// Dropping the animator cancels its outstanding frame request.
#[derive(Debug)]
pub struct ScrollAnimator<F: FrameScheduler> {
    state: ScrollState,
    phase: Phase,
    config: ScrollConfig,
    scheduler: F,
}

impl<F: FrameScheduler> ScrollAnimator<F> {
    pub fn new(config: ScrollConfig, scheduler: F) -> Self {
        Self {
            state: ScrollState::default(),
            phase: Phase::Idle,
            config,
            scheduler,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn target(&self) -> f64 {
        self.state.target
    }

    pub fn max_scroll(&self) -> f64 {
        self.state.max_scroll()
    }

    pub fn container_extent(&self) -> f64 {
        self.state.container_extent
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Converging(_))
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        match self.phase {
            Phase::Converging(token) => Some(token),
            Phase::Idle => None,
        }
    }

    /// Record new measurements and pull offset and target back in bounds.
    pub fn set_extents(&mut self, content_extent: f64, container_extent: f64) {
        self.state.content_extent = sanitize_extent(content_extent);
        self.state.container_extent = sanitize_extent(container_extent);
        self.state.target = self.state.clamp(self.state.target);
        self.state.offset = self.state.clamp(self.state.offset);
        if self.state.offset != self.state.target {
            self.ensure_loop();
        }
    }

    /// Apply a wheel delta. Returns the new target.
    pub fn on_wheel(&mut self, delta: f64, mode: DeltaMode) -> f64 {
        if !delta.is_finite() {
            tracing::debug!("Ignoring non-finite wheel delta {}", delta);
            return self.state.target;
        }
        let scale = match mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => self.config.line_height_px,
            DeltaMode::Page => self.state.container_extent,
        };
        let step = delta * scale * self.config.gain;
        self.scroll_to(self.state.target + step)
    }

    /// Retarget the animation. Returns the clamped target.
    pub fn scroll_to(&mut self, target: f64) -> f64 {
        self.state.target = self.state.clamp(target);
        if self.state.target != self.state.offset {
            self.ensure_loop();
        }
        self.state.target
    }

    /// Move immediately, abandoning any animation.
    pub fn jump_to(&mut self, offset: f64) {
        self.stop_loop();
        let offset = self.state.clamp(offset);
        self.state.offset = offset;
        self.state.target = offset;
    }

    /// Advance one frame. Tokens other than the one this animator is
    /// waiting on are stale and ignored.
    pub fn on_frame(&mut self, token: FrameToken) -> Option<FrameOutcome> {
        if self.phase != Phase::Converging(token) {
            return None;
        }
        let diff = self.state.target - self.state.offset;
        if diff.abs() < self.config.snap_epsilon {
            self.state.offset = self.state.target;
            self.phase = Phase::Idle;
            return Some(FrameOutcome {
                offset: self.state.offset,
                settled: true,
            });
        }

        self.state.offset = self
            .state
            .clamp(self.state.offset + diff * self.config.convergence);
        self.phase = Phase::Converging(self.scheduler.request_frame());
        Some(FrameOutcome {
            offset: self.state.offset,
            settled: false,
        })
    }

    fn ensure_loop(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Converging(self.scheduler.request_frame());
        }
    }

    fn stop_loop(&mut self) {
        if let Phase::Converging(token) = self.phase {
            self.scheduler.cancel_frame(token);
            self.phase = Phase::Idle;
        }
    }
}

impl<F: FrameScheduler> Drop for ScrollAnimator<F> {
    fn drop(&mut self) {
        self.stop_loop();
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ManualFrameClock;

    fn animator(clock: &ManualFrameClock) -> ScrollAnimator<ManualFrameClock> {
        let mut animator = ScrollAnimator::new(ScrollConfig::default(), clock.clone());
        animator.set_extents(10_000.0, 1_000.0);
        animator
    }

    /// Deliver frames until the clock is quiet; returns frames used.
    fn run(clock: &ManualFrameClock, animator: &mut ScrollAnimator<ManualFrameClock>) -> usize {
        let mut frames = 0;
        while frames < 1_000 {
            let due = clock.drain_due();
            if due.is_empty() {
                break;
            }
            for token in due {
                if let Some(outcome) = animator.on_frame(token) {
                    assert!(outcome.offset >= 0.0 && outcome.offset <= animator.max_scroll());
                }
            }
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_wheel_scales_by_gain_and_mode() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);

        assert!((anim.on_wheel(100.0, DeltaMode::Pixel) - 52.0).abs() < 1e-9);
        assert!((anim.on_wheel(3.0, DeltaMode::Line) - (52.0 + 3.0 * 16.0 * 0.52)).abs() < 1e-9);

        let before = anim.target();
        let after = anim.on_wheel(1.0, DeltaMode::Page);
        assert!((after - before - 1_000.0 * 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_single_loop_for_burst() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);

        for _ in 0..10 {
            anim.on_wheel(120.0, DeltaMode::Pixel);
        }
        assert_eq!(clock.pending_count(), 1);
        assert!(anim.is_animating());
    }

    #[test]
    fn test_converges_and_snaps_exactly() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.on_wheel(500.0, DeltaMode::Pixel);

        let frames = run(&clock, &mut anim);
        assert_eq!(anim.offset(), anim.target());
        assert!((anim.offset() - 260.0).abs() < 1e-9);
        assert!(!anim.is_animating());
        // ln(260 / 0.5) / -ln(0.76) ~ 23 easing frames plus the snap.
        assert!(frames <= 30, "took {} frames", frames);
    }

    #[test]
    fn test_first_frame_closes_convergence_fraction() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.scroll_to(100.0);

        let token = clock.drain_due()[0];
        let outcome = anim.on_frame(token).unwrap();
        assert!((outcome.offset - 24.0).abs() < 1e-9);
        assert!(!outcome.settled);
    }

    #[test]
    fn test_target_clamped_to_bounds() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);

        assert_eq!(anim.on_wheel(-500.0, DeltaMode::Pixel), 0.0);
        assert!(!anim.is_animating());

        assert_eq!(anim.on_wheel(1e9, DeltaMode::Pixel), 9_000.0);
        run(&clock, &mut anim);
        assert_eq!(anim.offset(), 9_000.0);
    }

    #[test]
    fn test_retarget_mid_flight_uses_same_loop() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.scroll_to(1_000.0);
        for token in clock.drain_due() {
            anim.on_frame(token);
        }

        anim.scroll_to(200.0);
        assert_eq!(clock.pending_count(), 1);
        run(&clock, &mut anim);
        assert_eq!(anim.offset(), 200.0);
    }

    #[test]
    fn test_stale_token_ignored() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.scroll_to(300.0);
        let first = clock.drain_due()[0];
        anim.on_frame(first);

        assert!(anim.on_frame(first).is_none());
        assert_eq!(clock.pending_count(), 1);
    }

    #[test]
    fn test_unmeasured_container_has_no_scroll() {
        let clock = ManualFrameClock::new();
        let mut anim = ScrollAnimator::new(ScrollConfig::default(), clock.clone());
        anim.set_extents(0.0, 0.0);

        assert_eq!(anim.max_scroll(), 0.0);
        assert_eq!(anim.on_wheel(100.0, DeltaMode::Page), 0.0);
        assert_eq!(anim.on_wheel(f64::NAN, DeltaMode::Pixel), 0.0);

        anim.set_extents(f64::INFINITY, f64::NAN);
        assert_eq!(anim.max_scroll(), 0.0);
        assert!(anim.offset().is_finite());
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.jump_to(8_000.0);
        assert_eq!(anim.offset(), 8_000.0);

        anim.set_extents(3_000.0, 1_000.0);
        assert_eq!(anim.offset(), 2_000.0);
        assert_eq!(anim.target(), 2_000.0);
    }

    #[test]
    fn test_jump_cancels_pending_frame() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        anim.scroll_to(500.0);
        anim.jump_to(100.0);

        assert_eq!(clock.pending_count(), 0);
        assert!(!anim.is_animating());
        assert_eq!(anim.offset(), 100.0);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let clock = ManualFrameClock::new();
        {
            let mut anim = animator(&clock);
            anim.scroll_to(500.0);
            assert_eq!(clock.pending_count(), 1);
        }
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn test_mixed_wheel_sequence_stays_in_bounds() {
        let clock = ManualFrameClock::new();
        let mut anim = animator(&clock);
        let deltas = [400.0, -1200.0, 3000.0, 50.0, -20.0, 9000.0, 9000.0, -700.0];

        for delta in deltas {
            anim.on_wheel(delta, DeltaMode::Pixel);
            for token in clock.drain_due() {
                let outcome = anim.on_frame(token).unwrap();
                assert!(outcome.offset >= 0.0 && outcome.offset <= anim.max_scroll());
            }
        }
        let frames = run(&clock, &mut anim);
        assert!(frames < 60);
        assert_eq!(anim.offset(), anim.target());
    }
}
