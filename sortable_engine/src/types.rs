// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the engine: axes, input events, handles, results, and the host seams.
//!
//! ## Overview
//!
//! The engine never touches a real document. Everything it reads goes through
//! [`Layout`], and every side effect it needs (document listeners, interval
//! timers, scrolling) goes through [`Platform`]. A type implementing both is a
//! [`Host`].

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Insets, Point, Rect, Size, Vec2};

bitflags::bitflags! {
    /// A set of coordinate axes.
    ///
    /// Used for the axes a drag may move along, for the axes an element can
    /// scroll along, and for the axes an auto-scroll is currently driving.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Axis: u8 {
        /// Horizontal.
        const X = 0b0000_0001;
        /// Vertical.
        const Y = 0b0000_0010;
    }
}

impl Axis {
    /// Keep only the components of `v` along the axes in this set.
    pub fn project(self, v: Vec2) -> Vec2 {
        Vec2::new(
            if self.contains(Self::X) { v.x } else { 0.0 },
            if self.contains(Self::Y) { v.y } else { 0.0 },
        )
    }
}

bitflags::bitflags! {
    /// Document-level pointer listeners the engine installs during a drag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        /// `mousemove` / `touchmove`.
        const MOVE = 0b0000_0001;
        /// `mouseup` / `touchend` / `touchcancel`.
        const END  = 0b0000_0010;
    }
}

/// The element (or the window) that scrolls during a drag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScrollTarget<N> {
    /// The viewport itself.
    Window,
    /// A scrollable element.
    Element(N),
}

/// Which pointer button produced an event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    #[default]
    Primary,
    /// Middle mouse button.
    Auxiliary,
    /// Right mouse button; never starts a drag.
    Secondary,
}

/// A pointer or touch event, in viewport (client) coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// Mouse or pen position, if the event carries one.
    pub position: Option<Point>,
    /// Active touch points; the first one is used.
    pub touches: Vec<Point>,
    /// Touch points that changed in this event (the only ones present on `touchend`).
    pub changed_touches: Vec<Point>,
    /// Button that triggered the event.
    pub button: PointerButton,
}

impl PointerEvent {
    /// A primary-button mouse event at `position`.
    pub fn mouse(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// A single-touch event at `position`.
    pub fn touch(position: Point) -> Self {
        Self {
            touches: alloc::vec![position],
            ..Default::default()
        }
    }

    /// Replace the button.
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Whether this event came from touch input.
    pub fn is_touch(&self) -> bool {
        !self.touches.is_empty() || !self.changed_touches.is_empty()
    }
}

/// Keys the engine reacts to while a drag is in progress.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Key {
    /// Cancels the drag without committing a reorder.
    Escape,
    /// Anything else; ignored.
    Other,
}

/// Handle of an interval timer started through [`Platform::set_interval`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(pub u64);

/// Tag separating independent lists that share one engine.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Collection(pub u32);

/// Identity of a registered sortable node.
///
/// Generational, like the element ids of a document: a key handed out by
/// [`Manager::register`](crate::manager::Manager::register) stays valid until
/// that node is unregistered and never aliases a later registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeKey(pub(crate) u32, pub(crate) u32);

impl NodeKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Result of a completed drag, reported once on release.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DropChange {
    /// Collection the dragged node belongs to.
    pub collection: Collection,
    /// Index of the dragged node when the drag started.
    pub old_index: usize,
    /// Index the node should move to.
    pub new_index: usize,
}

/// Emitted during a drag whenever the candidate index changes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SortOver {
    /// Collection the dragged node belongs to.
    pub collection: Collection,
    /// Index of the dragged node when the drag started.
    pub index: usize,
    /// Previous candidate index.
    pub old_index: usize,
    /// New candidate index.
    pub new_index: usize,
}

/// Emitted once when a press turns into a drag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SortStart {
    /// Collection the dragged node belongs to.
    pub collection: Collection,
    /// Index of the dragged node.
    pub index: usize,
}

/// How a started drag ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SortEnd {
    /// Released; the same change `on_drop_change` receives.
    Dropped(DropChange),
    /// Aborted with Escape or [`cancel`](crate::engine::SortableEngine::cancel).
    Cancelled {
        /// Collection the dragged node belongs to.
        collection: Collection,
        /// Index of the dragged node when the drag started.
        index: usize,
    },
}

/// Read-only geometry of the host document.
///
/// All rectangles are in viewport (client) coordinates; offsets are relative
/// to the parent's content origin and unaffected by scrolling.
pub trait Layout<N> {
    /// Parent of `node`, `None` at the root.
    fn parent(&self, node: N) -> Option<N>;
    /// Border box of `node` after all scrolling, or `None` if it is detached.
    fn bounding_rect(&self, node: N) -> Option<Rect>;
    /// Position of `node` relative to its parent (`offsetLeft` / `offsetTop`).
    fn offset(&self, node: N) -> Vec2;
    /// Outer margins of `node`.
    fn margin(&self, node: N) -> Insets;
    /// Grid gap between the children of `node`.
    fn gap(&self, node: N) -> Vec2;
    /// Axes along which `node` may scroll.
    fn overflow(&self, node: N) -> Axis;
    /// Current scroll position of a target.
    fn scroll_offset(&self, target: ScrollTarget<N>) -> Vec2;
    /// Scrollable content size of a target.
    fn scroll_extent(&self, target: ScrollTarget<N>) -> Size;
    /// Visible rectangle of a target; the viewport for [`ScrollTarget::Window`].
    fn client_rect(&self, target: ScrollTarget<N>) -> Rect;
}

/// Side effects the engine asks of its host.
pub trait Platform<N> {
    /// Install document-level listeners.
    fn add_listeners(&mut self, listeners: Listeners);
    /// Remove document-level listeners previously installed.
    fn remove_listeners(&mut self, listeners: Listeners);
    /// Start a repeating timer; the host calls
    /// [`SortableEngine::on_auto_scroll_tick`](crate::engine::SortableEngine::on_auto_scroll_tick)
    /// with the returned id every `period`.
    fn set_interval(&mut self, period: Duration) -> TimerId;
    /// Cancel a timer. Must not deliver further ticks for it.
    fn clear_interval(&mut self, timer: TimerId);
    /// Scroll a target by `delta` pixels.
    fn scroll_by(&mut self, target: ScrollTarget<N>, delta: Vec2);
}

/// Everything the engine needs from the host framework.
pub trait Host<N>: Layout<N> + Platform<N> {}

impl<N, T: Layout<N> + Platform<N>> Host<N> for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_projection_drops_disabled_components() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(Axis::X.project(v), Vec2::new(3.0, 0.0));
        assert_eq!(Axis::Y.project(v), Vec2::new(0.0, -4.0));
        assert_eq!(Axis::all().project(v), v);
        assert_eq!(Axis::empty().project(v), Vec2::ZERO);
    }

    #[test]
    fn touch_detection() {
        assert!(!PointerEvent::mouse(Point::ZERO).is_touch());
        assert!(PointerEvent::touch(Point::ZERO).is_touch());
        let end = PointerEvent {
            changed_touches: alloc::vec![Point::new(1.0, 2.0)],
            ..Default::default()
        };
        assert!(end.is_touch());
    }
}
