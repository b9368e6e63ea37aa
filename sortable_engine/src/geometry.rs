// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry helpers over a [`Layout`].

use alloc::vec::Vec;

use kurbo::{Insets, Point, Vec2};

use crate::types::{Layout, PointerEvent};

/// Position of an event: first touch, else first changed touch, else the pointer.
///
/// Returns the origin if the event carries no position at all.
pub fn event_coordinates(event: &PointerEvent) -> Point {
    event
        .touches
        .first()
        .or_else(|| event.changed_touches.first())
        .copied()
        .or(event.position)
        .unwrap_or(Point::ZERO)
}

/// `a - b`.
#[inline]
pub fn delta(a: Point, b: Point) -> Vec2 {
    a - b
}

/// Combined horizontal and vertical margins of `node`.
pub fn element_margin<N, L: Layout<N> + ?Sized>(layout: &L, node: N) -> Vec2 {
    let m = layout.margin(node);
    Vec2::new(m.x0 + m.x1, m.y0 + m.y1)
}

/// Distance between two neighbouring items, given one item's margins and the container gap.
///
/// Horizontal margins add up; vertical margins collapse into the largest of
/// the two and the gap.
pub fn margin_offset(margin: Insets, gap: Vec2) -> Vec2 {
    Vec2::new(
        margin.x0 + margin.x1 + gap.x,
        margin.y0.max(margin.y1).max(gap.y),
    )
}

/// Sum of the scroll positions of `ancestors`.
pub fn nested_scroll_offsets<N: Copy, L: Layout<N> + ?Sized>(layout: &L, ancestors: &[N]) -> Vec2 {
    ancestors
        .iter()
        .map(|a| layout.scroll_offset(crate::types::ScrollTarget::Element(*a)))
        .fold(Vec2::ZERO, |acc, s| acc + s)
}

/// Strict ancestors of `node` that can scroll, nearest first, up to and including the root.
pub fn scrollable_ancestors<N: Copy, L: Layout<N> + ?Sized>(layout: &L, node: N) -> Vec<N> {
    let mut out = Vec::new();
    let mut cursor = layout.parent(node);
    while let Some(n) = cursor {
        if !layout.overflow(n).is_empty() {
            out.push(n);
        }
        cursor = layout.parent(n);
    }
    out
}

/// Nearest element, starting at `node` itself, that can scroll.
pub fn scrolling_parent<N: Copy, L: Layout<N> + ?Sized>(layout: &L, node: N) -> Option<N> {
    if !layout.overflow(node).is_empty() {
        return Some(node);
    }
    scrollable_ancestors(layout, node).first().copied()
}

/// Cumulative offset of `node` up to, not including, `container`.
///
/// If `container` is not an ancestor the walk stops at the root.
pub fn edge_offset<N: Copy + PartialEq, L: Layout<N> + ?Sized>(
    layout: &L,
    node: N,
    container: N,
) -> Vec2 {
    let mut acc = Vec2::ZERO;
    let mut cursor = Some(node);
    while let Some(n) = cursor {
        if n == container {
            break;
        }
        acc += layout.offset(n);
        cursor = layout.parent(n);
    }
    acc
}

/// Clamp `value` into `[min, max]`; unlike `f64::clamp` this never panics when `min > max`.
#[inline]
pub fn limit(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
