// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll coordinator: tracks the scroll container of the current drag.
//!
//! ## Usage
//!
//! 1) At drag start, call [`ScrollCoordinator::set_scrollable_container`] with
//!    the element (or the window) that should auto-scroll.
//! 2) Whenever the pointer moves or anything scrolls, call
//!    [`ScrollCoordinator::refresh`] to bring the [`ContainerDescriptor`] up to date.
//! 3) Read [`ScrollCoordinator::content_delta`] to compensate pointer math for
//!    content that moved under a stationary pointer.

use kurbo::{Size, Vec2};

use crate::types::{Axis, Layout, ScrollTarget};

/// Snapshot of the scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerDescriptor {
    /// Visible size of the container.
    pub size: Size,
    /// Axes whose scrollable extent exceeds the visible extent.
    pub has_scroll: Axis,
    /// Container scroll since the descriptor was last reset.
    pub delta_scroll: Vec2,
    /// Window scroll since the descriptor was last reset.
    pub window_delta: Vec2,
    /// Current scroll position of the container.
    pub scroll_offset: Vec2,
    /// Largest scroll position the content allows on each axis.
    pub max_scroll: Vec2,
}

/// Tracks one scroll container and its scroll delta since drag start.
#[derive(Clone, Debug)]
pub struct ScrollCoordinator<N> {
    target: Option<ScrollTarget<N>>,
    initial_scroll: Vec2,
    initial_window_scroll: Vec2,
    descriptor: ContainerDescriptor,
}

impl<N> Default for ScrollCoordinator<N> {
    fn default() -> Self {
        Self {
            target: None,
            initial_scroll: Vec2::ZERO,
            initial_window_scroll: Vec2::ZERO,
            descriptor: ContainerDescriptor::default(),
        }
    }
}

impl<N: Copy> ScrollCoordinator<N> {
    /// Create a coordinator observing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `target`, resetting the scroll deltas to zero.
    pub fn set_scrollable_container<L: Layout<N> + ?Sized>(
        &mut self,
        layout: &L,
        target: ScrollTarget<N>,
    ) {
        self.target = Some(target);
        self.initial_scroll = layout.scroll_offset(target);
        self.initial_window_scroll = layout.scroll_offset(ScrollTarget::Window);
        self.descriptor = ContainerDescriptor::default();
        self.refresh(layout);
    }

    /// Stop observing; the descriptor returns to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The observed container, if any.
    pub fn target(&self) -> Option<ScrollTarget<N>> {
        self.target
    }

    /// Re-read size, overflow, and scroll deltas from the layout.
    pub fn refresh<L: Layout<N> + ?Sized>(&mut self, layout: &L) -> &ContainerDescriptor {
        let Some(target) = self.target else {
            return &self.descriptor;
        };
        let size = layout.client_rect(target).size();
        let extent = layout.scroll_extent(target);
        let mut has_scroll = Axis::empty();
        if extent.width > size.width {
            has_scroll |= Axis::X;
        }
        if extent.height > size.height {
            has_scroll |= Axis::Y;
        }
        if let ScrollTarget::Element(node) = target {
            has_scroll &= layout.overflow(node);
        }
        let scroll_offset = layout.scroll_offset(target);
        self.descriptor = ContainerDescriptor {
            size,
            has_scroll,
            delta_scroll: scroll_offset - self.initial_scroll,
            window_delta: layout.scroll_offset(ScrollTarget::Window) - self.initial_window_scroll,
            scroll_offset,
            max_scroll: Vec2::new(
                (extent.width - size.width).max(0.0),
                (extent.height - size.height).max(0.0),
            ),
        };
        &self.descriptor
    }

    /// Last refreshed descriptor.
    pub fn descriptor(&self) -> &ContainerDescriptor {
        &self.descriptor
    }

    /// How far content inside the container moved relative to the viewport since the reset.
    ///
    /// This is the container scroll plus, for an element container, the window scroll.
    pub fn content_delta(&self) -> Vec2 {
        match self.target {
            Some(ScrollTarget::Element(_)) => {
                self.descriptor.delta_scroll + self.descriptor.window_delta
            }
            Some(ScrollTarget::Window) => self.descriptor.delta_scroll,
            None => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Insets, Rect};

    /// One scrollable element (node 0) inside a scrollable window.
    #[derive(Default)]
    struct Fake {
        scroll: Vec2,
        window: Vec2,
        overflow: Axis,
    }

    impl Layout<u8> for Fake {
        fn parent(&self, _node: u8) -> Option<u8> {
            None
        }
        fn bounding_rect(&self, _node: u8) -> Option<Rect> {
            None
        }
        fn offset(&self, _node: u8) -> Vec2 {
            Vec2::ZERO
        }
        fn margin(&self, _node: u8) -> Insets {
            Insets::ZERO
        }
        fn gap(&self, _node: u8) -> Vec2 {
            Vec2::ZERO
        }
        fn overflow(&self, _node: u8) -> Axis {
            self.overflow
        }
        fn scroll_offset(&self, target: ScrollTarget<u8>) -> Vec2 {
            match target {
                ScrollTarget::Window => self.window,
                ScrollTarget::Element(_) => self.scroll,
            }
        }
        fn scroll_extent(&self, target: ScrollTarget<u8>) -> Size {
            match target {
                ScrollTarget::Window => Size::new(800.0, 2000.0),
                ScrollTarget::Element(_) => Size::new(300.0, 100.0),
            }
        }
        fn client_rect(&self, target: ScrollTarget<u8>) -> Rect {
            match target {
                ScrollTarget::Window => Rect::new(0.0, 0.0, 800.0, 600.0),
                ScrollTarget::Element(_) => Rect::new(10.0, 10.0, 110.0, 110.0),
            }
        }
    }

    #[test]
    fn unset_coordinator_reports_nothing() {
        let mut c: ScrollCoordinator<u8> = ScrollCoordinator::new();
        let d = *c.refresh(&Fake::default());
        assert_eq!(d, ContainerDescriptor::default());
        assert_eq!(c.content_delta(), Vec2::ZERO);
    }

    #[test]
    fn has_scroll_requires_extent_and_overflow() {
        let mut layout = Fake {
            overflow: Axis::all(),
            ..Default::default()
        };
        let mut c = ScrollCoordinator::new();
        c.set_scrollable_container(&layout, ScrollTarget::Element(0));
        assert_eq!(c.descriptor().size, Size::new(100.0, 100.0));
        // Wider than visible, but not taller.
        assert_eq!(c.descriptor().has_scroll, Axis::X);
        assert_eq!(c.descriptor().max_scroll, Vec2::new(200.0, 0.0));

        layout.overflow = Axis::Y;
        c.refresh(&layout);
        assert!(c.descriptor().has_scroll.is_empty());

        c.set_scrollable_container(&layout, ScrollTarget::Window);
        assert_eq!(c.descriptor().has_scroll, Axis::Y);
    }

    #[test]
    fn deltas_are_relative_to_reset() {
        let mut layout = Fake {
            scroll: Vec2::new(0.0, 40.0),
            window: Vec2::new(0.0, 5.0),
            overflow: Axis::Y,
        };
        let mut c = ScrollCoordinator::new();
        c.set_scrollable_container(&layout, ScrollTarget::Element(0));
        assert_eq!(c.descriptor().delta_scroll, Vec2::ZERO);

        layout.scroll.y = 55.0;
        layout.window.y = 8.0;
        c.refresh(&layout);
        assert_eq!(c.descriptor().delta_scroll, Vec2::new(0.0, 15.0));
        assert_eq!(c.descriptor().window_delta, Vec2::new(0.0, 3.0));
        assert_eq!(c.descriptor().scroll_offset, Vec2::new(0.0, 55.0));
        assert_eq!(c.content_delta(), Vec2::new(0.0, 18.0));

        c.set_scrollable_container(&layout, ScrollTarget::Window);
        layout.window.y = 10.0;
        c.refresh(&layout);
        // The window is the container: counted once.
        assert_eq!(c.content_delta(), Vec2::new(0.0, 2.0));

        c.reset();
        assert_eq!(c.target(), None);
    }
}
