// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scroller.
//!
//! ## States
//!
//! - **Idle**: no timer.
//! - **Scrolling**: one interval timer is running; each tick the engine
//!   scrolls the container by [`AutoScroller::velocity`].
//!
//! [`AutoScroller::update`] moves between the two on every pointer move.
//! [`AutoScroller::clear`] forces Idle and is idempotent.
//!
//! ## Edge band
//!
//! Along each enabled axis the pointer position inside the container is
//! normalized to `t` in `[0, 1]`. The band at each edge is `0.5 - threshold`
//! wide, so a threshold of `0.45` scrolls only in the outer 5% at either end.
//! Inside a band the speed grows linearly from `min_speed` at the band's
//! inner boundary to `max_speed` at the edge and stays there past it.
//!
//! A direction in which the container is already scrolled to its limit
//! contributes no speed, so the timer never runs without effect.

use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::config::SortableConfig;
use crate::scroll::ContainerDescriptor;
use crate::types::{Axis, Platform, TimerId};

/// Subset of [`SortableConfig`] the auto-scroller reads.
#[derive(Clone, Debug, PartialEq)]
pub struct AutoScrollConfig {
    /// Axes allowed to scroll.
    pub axis: Axis,
    /// Tick period.
    pub interval: Duration,
    /// Edge-proximity setting; see the module docs.
    pub threshold: f64,
    /// Slowest speed in px per tick.
    pub min_speed: f64,
    /// Fastest speed in px per tick.
    pub max_speed: f64,
}

impl From<&SortableConfig> for AutoScrollConfig {
    fn from(config: &SortableConfig) -> Self {
        Self {
            axis: config.axis,
            interval: config.interval,
            threshold: config.threshold,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
        }
    }
}

/// Whether a timer is running.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AutoScrollPhase {
    /// No timer.
    Idle,
    /// Timer running.
    Scrolling,
}

/// Drives a repeating scroll while the pointer is near a container edge.
#[derive(Clone, Debug)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    timer: Option<TimerId>,
    velocity: Vec2,
}

impl AutoScroller {
    /// Create an idle auto-scroller.
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            timer: None,
            velocity: Vec2::ZERO,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> AutoScrollPhase {
        if self.timer.is_some() {
            AutoScrollPhase::Scrolling
        } else {
            AutoScrollPhase::Idle
        }
    }

    /// The running timer, if any.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Scroll vector applied on each tick; zero while idle.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Scroll vector for a pointer at `position` relative to the container's top-left corner.
    ///
    /// Axes missing from `has_scroll` or from the configured axes stay at zero.
    pub fn compute_velocity(&self, position: Vec2, size: Size, has_scroll: Axis) -> Vec2 {
        let active = self.config.axis & has_scroll;
        let x = if active.contains(Axis::X) {
            self.axis_speed(position.x, size.width)
        } else {
            0.0
        };
        let y = if active.contains(Axis::Y) {
            self.axis_speed(position.y, size.height)
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    /// Recompute the scroll need after a pointer move.
    ///
    /// `init_related_position` is the pointer position relative to the
    /// container at drag start and `delta_position` the pointer travel since.
    /// Starts a timer when an edge comes within range and cancels it when none is.
    pub fn update<N, P: Platform<N> + ?Sized>(
        &mut self,
        platform: &mut P,
        delta_position: Vec2,
        init_related_position: Vec2,
        container: &ContainerDescriptor,
    ) -> Vec2 {
        let velocity = headroom(
            self.compute_velocity(
                init_related_position + delta_position,
                container.size,
                container.has_scroll,
            ),
            container,
        );
        if velocity == Vec2::ZERO {
            self.clear(platform);
            return velocity;
        }
        if self.timer.is_none() {
            let timer = platform.set_interval(self.config.interval);
            log::trace!("auto-scroll started: timer {timer:?}, velocity {velocity:?}");
            self.timer = Some(timer);
        }
        self.velocity = velocity;
        velocity
    }

    /// After a tick, drop the directions the container can no longer scroll in.
    ///
    /// Returns to Idle once nothing is left. Returns whether the timer was stopped.
    pub fn stop_at_limits<N, P: Platform<N> + ?Sized>(
        &mut self,
        platform: &mut P,
        container: &ContainerDescriptor,
    ) -> bool {
        if self.timer.is_none() {
            return false;
        }
        let velocity = headroom(self.velocity, container);
        if velocity == Vec2::ZERO {
            log::trace!("auto-scroll reached the end of the content");
            self.clear(platform);
            return true;
        }
        self.velocity = velocity;
        false
    }

    /// Return to Idle, cancelling the timer if one is running.
    pub fn clear<N, P: Platform<N> + ?Sized>(&mut self, platform: &mut P) {
        if let Some(timer) = self.timer.take() {
            log::trace!("auto-scroll stopped: timer {timer:?}");
            platform.clear_interval(timer);
        }
        self.velocity = Vec2::ZERO;
    }

    fn axis_speed(&self, position: f64, extent: f64) -> f64 {
        let band = 0.5 - self.config.threshold;
        if extent <= 0.0 || band <= 0.0 {
            return 0.0;
        }
        let t = position / extent;
        let (direction, depth) = if t < band {
            (-1.0, (band - t) / band)
        } else if t > 1.0 - band {
            (1.0, (t - (1.0 - band)) / band)
        } else {
            return 0.0;
        };
        let (min, max) = (self.config.min_speed, self.config.max_speed);
        let speed = (min + (max - min) * depth.min(1.0)).min(max);
        direction * speed
    }
}

/// Zero each component of `velocity` pointing past the container's scroll range.
fn headroom(velocity: Vec2, container: &ContainerDescriptor) -> Vec2 {
    let keep = |v: f64, offset: f64, max: f64| {
        if (v < 0.0 && offset <= 0.0) || (v > 0.0 && offset >= max) {
            0.0
        } else {
            v
        }
    };
    Vec2::new(
        keep(velocity.x, container.scroll_offset.x, container.max_scroll.x),
        keep(velocity.y, container.scroll_offset.y, container.max_scroll.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScrollTarget;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Timers {
        next: u64,
        pending: Vec<TimerId>,
    }

    impl Platform<()> for Timers {
        fn add_listeners(&mut self, _listeners: crate::types::Listeners) {}
        fn remove_listeners(&mut self, _listeners: crate::types::Listeners) {}
        fn set_interval(&mut self, _period: Duration) -> TimerId {
            self.next += 1;
            let id = TimerId(self.next);
            self.pending.push(id);
            id
        }
        fn clear_interval(&mut self, timer: TimerId) {
            self.pending.retain(|t| *t != timer);
        }
        fn scroll_by(&mut self, _target: ScrollTarget<()>, _delta: Vec2) {}
    }

    fn scroller() -> AutoScroller {
        AutoScroller::new(AutoScrollConfig::from(&SortableConfig::default()))
    }

    const SIZE: Size = Size::new(100.0, 200.0);

    /// A vertically scrollable container scrolled to `offset`, with 1000px of range.
    fn container(offset: f64) -> ContainerDescriptor {
        ContainerDescriptor {
            size: SIZE,
            has_scroll: Axis::Y,
            scroll_offset: Vec2::new(0.0, offset),
            max_scroll: Vec2::new(0.0, 1000.0),
            ..Default::default()
        }
    }

    #[test]
    fn middle_of_container_is_idle() {
        let s = scroller();
        assert_eq!(
            s.compute_velocity(Vec2::new(50.0, 100.0), SIZE, Axis::Y),
            Vec2::ZERO
        );
        // Band is 5% of 200 = 10px: 11px from the top is still outside.
        assert_eq!(
            s.compute_velocity(Vec2::new(50.0, 11.0), SIZE, Axis::Y),
            Vec2::ZERO
        );
    }

    #[test]
    fn speed_grows_towards_the_edge() {
        let s = scroller();
        let shallow = s.compute_velocity(Vec2::new(50.0, 9.0), SIZE, Axis::Y).y;
        let deep = s.compute_velocity(Vec2::new(50.0, 1.0), SIZE, Axis::Y).y;
        assert!(shallow < 0.0 && deep < 0.0, "top edge scrolls up");
        assert!(-deep > -shallow, "deeper must be faster");
        assert!(-shallow >= 2.0);

        let at_edge = s.compute_velocity(Vec2::new(50.0, 0.0), SIZE, Axis::Y).y;
        let past_edge = s.compute_velocity(Vec2::new(50.0, -40.0), SIZE, Axis::Y).y;
        assert_eq!(at_edge, -10.0);
        assert_eq!(past_edge, -10.0, "capped at max speed");

        let bottom = s.compute_velocity(Vec2::new(50.0, 195.0), SIZE, Axis::Y).y;
        assert!(bottom > 6.0 - 1e-9 && bottom < 6.0 + 1e-9, "halfway into the bottom band");
    }

    #[test]
    fn axis_without_overflow_never_scrolls() {
        let s = scroller();
        assert_eq!(
            s.compute_velocity(Vec2::new(50.0, 0.0), SIZE, Axis::X),
            Vec2::ZERO
        );
        // Overflow on X but only Y configured.
        assert_eq!(
            s.compute_velocity(Vec2::new(0.0, 100.0), SIZE, Axis::all()),
            Vec2::ZERO
        );
    }

    #[test]
    fn threshold_at_half_disables_scrolling() {
        let s = AutoScroller::new(AutoScrollConfig {
            threshold: 0.5,
            ..AutoScrollConfig::from(&SortableConfig::default())
        });
        assert_eq!(
            s.compute_velocity(Vec2::new(0.0, 0.0), SIZE, Axis::Y),
            Vec2::ZERO
        );
    }

    #[test]
    fn update_starts_one_timer_and_clear_is_idempotent() {
        let mut timers = Timers::default();
        let mut s = scroller();
        let init = Vec2::new(50.0, 100.0);
        let c = container(500.0);

        s.update(&mut timers, Vec2::new(0.0, -95.0), init, &c);
        assert_eq!(s.phase(), AutoScrollPhase::Scrolling);
        s.update(&mut timers, Vec2::new(0.0, -99.0), init, &c);
        assert_eq!(timers.pending.len(), 1, "still a single timer");
        assert!(s.velocity().y < 0.0);

        // Back to the middle.
        s.update(&mut timers, Vec2::ZERO, init, &c);
        assert_eq!(s.phase(), AutoScrollPhase::Idle);
        assert!(timers.pending.is_empty());

        s.update(&mut timers, Vec2::new(0.0, 99.0), init, &c);
        s.clear(&mut timers);
        s.clear(&mut timers);
        assert!(timers.pending.is_empty());
        assert_eq!(s.velocity(), Vec2::ZERO);
        assert_eq!(s.timer(), None);
    }

    #[test]
    fn exhausted_direction_never_starts_a_timer() {
        let mut timers = Timers::default();
        let mut s = scroller();
        let init = Vec2::new(50.0, 100.0);

        // Near the top edge while already at the top.
        s.update(&mut timers, Vec2::new(0.0, -99.0), init, &container(0.0));
        assert_eq!(s.phase(), AutoScrollPhase::Idle);
        assert!(timers.pending.is_empty());

        // Near the bottom edge at the bottom limit.
        s.update(&mut timers, Vec2::new(0.0, 99.0), init, &container(1000.0));
        assert_eq!(s.phase(), AutoScrollPhase::Idle);
    }

    #[test]
    fn reaching_the_limit_stops_the_timer() {
        let mut timers = Timers::default();
        let mut s = scroller();
        let init = Vec2::new(50.0, 100.0);
        s.update(&mut timers, Vec2::new(0.0, 99.0), init, &container(990.0));
        assert_eq!(timers.pending.len(), 1);

        assert!(!s.stop_at_limits(&mut timers, &container(995.0)));
        assert_eq!(s.phase(), AutoScrollPhase::Scrolling);
        assert!(s.stop_at_limits(&mut timers, &container(1000.0)));
        assert_eq!(s.phase(), AutoScrollPhase::Idle);
        assert!(timers.pending.is_empty());
        assert!(!s.stop_at_limits(&mut timers, &container(1000.0)), "already idle");
    }
}
