// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: element identifiers, overflow flags, and local geometry.

use kurbo::{Insets, Size, Vec2};

/// Identifier for an element in the document.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an `ElementId` still refers
/// to a live element. Stale ids never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Overflow behavior of an element, per axis.
    ///
    /// An element only scrolls along an axis whose flag is set; otherwise its
    /// content is clipped (or visible) and its scroll offset stays at zero.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Overflow: u8 {
        /// Content may scroll horizontally (`overflow-x: auto | scroll`).
        const SCROLL_X = 0b0000_0001;
        /// Content may scroll vertically (`overflow-y: auto | scroll`).
        const SCROLL_Y = 0b0000_0010;
    }
}

/// Local geometry and style of an element.
#[derive(Clone, Debug)]
pub struct Element {
    /// Position of the border box relative to the parent's content origin
    /// (the `offsetLeft` / `offsetTop` pair).
    pub offset: Vec2,
    /// Border-box size (also the visible client size when the element scrolls).
    pub size: Size,
    /// Outer margins. `x0`/`y0` are left/top, `x1`/`y1` are right/bottom.
    pub margin: Insets,
    /// Grid or flex gap between children.
    pub gap: Vec2,
    /// Which axes may scroll.
    pub overflow: Overflow,
    /// Current scroll position of the element's content.
    pub scroll_offset: Vec2,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Size::ZERO,
            margin: Insets::ZERO,
            gap: Vec2::ZERO,
            overflow: Overflow::empty(),
            scroll_offset: Vec2::ZERO,
        }
    }
}
