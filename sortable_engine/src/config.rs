// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration and its validation.

use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::types::Axis;

/// How far past a container edge the dragged item may travel when
/// [`SortableConfig::lock_to_container_edges`] is set.
///
/// Measured from the item's leading edge: `Percent(0.0)` keeps the whole item
/// inside, `Percent(50.0)` lets it go until its center reaches the edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LockOffset {
    /// Absolute offset in px.
    Pixels(f64),
    /// Percentage of the item's size along each axis.
    Percent(f64),
}

impl Default for LockOffset {
    fn default() -> Self {
        Self::Percent(50.0)
    }
}

impl LockOffset {
    /// Offset in px for an item of `size`.
    pub fn resolve(self, size: Size) -> Vec2 {
        match self {
            Self::Pixels(px) => Vec2::new(px, px),
            Self::Percent(pct) => Vec2::new(size.width, size.height) * (pct / 100.0),
        }
    }

    fn is_finite(self) -> bool {
        match self {
            Self::Pixels(v) | Self::Percent(v) => v.is_finite(),
        }
    }
}

/// Options recognized by [`SortableEngine`](crate::engine::SortableEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct SortableConfig {
    /// Axes a drag may move along; also the axes used for reordering (default: `Y`).
    pub axis: Axis,
    /// Auto-scroll the window rather than the nearest scrollable ancestor (default: false).
    pub is_scrollable_window: bool,
    /// Auto-scroll tick period (default: 5ms).
    pub interval: Duration,
    /// Edge-proximity setting in `[0, 1]`; the active band at each edge is `0.5 - threshold` wide (default: 0.45).
    pub threshold: f64,
    /// Scroll speed at the inner boundary of the edge band, in px per tick (default: 2).
    pub min_speed: f64,
    /// Scroll speed at the edge itself, in px per tick (default: 10).
    pub max_speed: f64,
    /// Manhattan distance in px the pointer must travel before a press becomes a drag (default: 0).
    pub distance: f64,
    /// Keep the dragged item inside the scroll container, see [`lock_offset`](Self::lock_offset) (default: false).
    pub lock_to_container_edges: bool,
    /// Offsets at the start and end edges used by `lock_to_container_edges` (default: 50% each).
    pub lock_offset: (LockOffset, LockOffset),
    /// Restrict the helper to these axes on top of [`axis`](Self::axis) (default: none).
    pub lock_axis: Option<Axis>,
    /// Never start the auto-scroller (default: false).
    pub disable_auto_scroll: bool,
    /// Hold time before a press becomes a drag; only used when `distance` is zero (default: 0).
    pub press_delay: Duration,
    /// Manhattan travel in px that aborts a press still waiting out `press_delay` (default: 5).
    pub press_threshold: f64,
    /// Only presses inside a node's [handle](crate::node::SortableNode::with_handle) start a drag (default: false).
    pub use_drag_handle: bool,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            is_scrollable_window: false,
            interval: Duration::from_millis(5),
            threshold: 0.45,
            min_speed: 2.0,
            max_speed: 10.0,
            distance: 0.0,
            lock_to_container_edges: false,
            lock_offset: (LockOffset::default(), LockOffset::default()),
            lock_axis: None,
            disable_auto_scroll: false,
            press_delay: Duration::ZERO,
            press_threshold: 5.0,
            use_drag_handle: false,
        }
    }
}

/// Rejected configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// No axis enabled.
    #[error("at least one axis must be enabled")]
    EmptyAxis,
    /// Threshold outside `[0, 1]` or not finite.
    #[error("threshold must be within [0, 1], got {0}")]
    Threshold(f64),
    /// Speeds negative, not finite, or inverted.
    #[error("invalid scroll speed range: min {min}, max {max}")]
    SpeedRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// Zero auto-scroll period.
    #[error("auto-scroll interval must be non-zero")]
    ZeroInterval,
    /// Negative or non-finite activation distance.
    #[error("activation distance must be a non-negative number, got {0}")]
    Distance(f64),
    /// Negative or non-finite press threshold.
    #[error("press threshold must be a non-negative number, got {0}")]
    PressThreshold(f64),
    /// Non-finite lock offset.
    #[error("lock offset must be finite, got {0:?}")]
    LockOffset(LockOffset),
}

impl SortableConfig {
    /// Check every option, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axis.is_empty() || self.lock_axis.is_some_and(|a| a.is_empty()) {
            return Err(ConfigError::EmptyAxis);
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        let speeds_ok = self.min_speed.is_finite()
            && self.max_speed.is_finite()
            && self.min_speed >= 0.0
            && self.min_speed <= self.max_speed;
        if !speeds_ok {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !(self.distance.is_finite() && self.distance >= 0.0) {
            return Err(ConfigError::Distance(self.distance));
        }
        if !(self.press_threshold.is_finite() && self.press_threshold >= 0.0) {
            return Err(ConfigError::PressThreshold(self.press_threshold));
        }
        let (start, end) = self.lock_offset;
        if let Some(bad) = [start, end].into_iter().find(|o| !o.is_finite()) {
            return Err(ConfigError::LockOffset(bad));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SortableConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_each_bad_option() {
        let base = SortableConfig::default();
        let cases = [
            (
                SortableConfig {
                    axis: Axis::empty(),
                    ..base.clone()
                },
                ConfigError::EmptyAxis,
            ),
            (
                SortableConfig {
                    threshold: 1.5,
                    ..base.clone()
                },
                ConfigError::Threshold(1.5),
            ),
            (
                SortableConfig {
                    min_speed: 12.0,
                    ..base.clone()
                },
                ConfigError::SpeedRange {
                    min: 12.0,
                    max: 10.0,
                },
            ),
            (
                SortableConfig {
                    interval: Duration::ZERO,
                    ..base.clone()
                },
                ConfigError::ZeroInterval,
            ),
            (
                SortableConfig {
                    distance: -1.0,
                    ..base.clone()
                },
                ConfigError::Distance(-1.0),
            ),
            (
                SortableConfig {
                    lock_axis: Some(Axis::empty()),
                    ..base.clone()
                },
                ConfigError::EmptyAxis,
            ),
            (
                SortableConfig {
                    press_threshold: f64::INFINITY,
                    ..base.clone()
                },
                ConfigError::PressThreshold(f64::INFINITY),
            ),
            (
                SortableConfig {
                    lock_offset: (LockOffset::Pixels(0.0), LockOffset::Pixels(f64::INFINITY)),
                    ..base.clone()
                },
                ConfigError::LockOffset(LockOffset::Pixels(f64::INFINITY)),
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = SortableConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Threshold(_))));
    }

    #[test]
    fn lock_offset_resolves_against_item_size() {
        let size = Size::new(80.0, 40.0);
        assert_eq!(LockOffset::default().resolve(size), Vec2::new(40.0, 20.0));
        assert_eq!(LockOffset::Percent(0.0).resolve(size), Vec2::ZERO);
        assert_eq!(LockOffset::Pixels(6.0).resolve(size), Vec2::new(6.0, 6.0));
    }
}
