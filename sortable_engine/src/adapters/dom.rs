// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host for Sortable DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! [`Document`] implements [`Layout`] directly. [`DomHost`] wraps a document
//! and records the side effects the engine asks for: the installed document
//! listeners and the running interval timers. Nothing fires timers on its
//! own; drive them by calling
//! [`SortableEngine::on_auto_scroll_tick`](crate::engine::SortableEngine::on_auto_scroll_tick)
//! with an id from [`DomHost::pending_timers`].

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Insets, Rect, Size, Vec2};
use sortable_dom::{Document, ElementId, Overflow};

use crate::types::{Axis, Layout, Listeners, Platform, ScrollTarget, TimerId};

impl Layout<ElementId> for Document {
    fn parent(&self, node: ElementId) -> Option<ElementId> {
        Self::parent(self, node)
    }

    fn bounding_rect(&self, node: ElementId) -> Option<Rect> {
        self.bounding_client_rect(node)
    }

    fn offset(&self, node: ElementId) -> Vec2 {
        self.get(node).map_or(Vec2::ZERO, |e| e.offset)
    }

    fn margin(&self, node: ElementId) -> Insets {
        self.get(node).map_or(Insets::ZERO, |e| e.margin)
    }

    fn gap(&self, node: ElementId) -> Vec2 {
        self.get(node).map_or(Vec2::ZERO, |e| e.gap)
    }

    fn overflow(&self, node: ElementId) -> Axis {
        let overflow = self.get(node).map(|e| e.overflow).unwrap_or_default();
        let mut axis = Axis::empty();
        axis.set(Axis::X, overflow.contains(Overflow::SCROLL_X));
        axis.set(Axis::Y, overflow.contains(Overflow::SCROLL_Y));
        axis
    }

    fn scroll_offset(&self, target: ScrollTarget<ElementId>) -> Vec2 {
        match target {
            ScrollTarget::Window => self.window_scroll(),
            ScrollTarget::Element(id) => self.get(id).map_or(Vec2::ZERO, |e| e.scroll_offset),
        }
    }

    fn scroll_extent(&self, target: ScrollTarget<ElementId>) -> Size {
        match target {
            ScrollTarget::Window => self.document_extent(),
            ScrollTarget::Element(id) => Self::scroll_extent(self, id),
        }
    }

    fn client_rect(&self, target: ScrollTarget<ElementId>) -> Rect {
        match target {
            ScrollTarget::Window => self.viewport().to_rect(),
            ScrollTarget::Element(id) => self.bounding_client_rect(id).unwrap_or(Rect::ZERO),
        }
    }
}

/// A [`Document`] plus recorded listeners and timers.
#[derive(Debug, Default)]
pub struct DomHost {
    document: Document,
    listeners: Listeners,
    timers: Vec<(TimerId, Duration)>,
    next_timer: u64,
}

impl DomHost {
    /// Wrap `document` with no listeners and no timers.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    /// The wrapped document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The wrapped document, mutably (e.g. to scroll it from outside a drag).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Unwrap the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Listeners currently installed.
    pub fn active_listeners(&self) -> Listeners {
        self.listeners
    }

    /// Running timers with their periods.
    pub fn pending_timers(&self) -> &[(TimerId, Duration)] {
        &self.timers
    }
}

impl Layout<ElementId> for DomHost {
    fn parent(&self, node: ElementId) -> Option<ElementId> {
        self.document.parent(node)
    }

    fn bounding_rect(&self, node: ElementId) -> Option<Rect> {
        self.document.bounding_client_rect(node)
    }

    fn offset(&self, node: ElementId) -> Vec2 {
        Layout::offset(&self.document, node)
    }

    fn margin(&self, node: ElementId) -> Insets {
        Layout::margin(&self.document, node)
    }

    fn gap(&self, node: ElementId) -> Vec2 {
        Layout::gap(&self.document, node)
    }

    fn overflow(&self, node: ElementId) -> Axis {
        Layout::overflow(&self.document, node)
    }

    fn scroll_offset(&self, target: ScrollTarget<ElementId>) -> Vec2 {
        Layout::scroll_offset(&self.document, target)
    }

    fn scroll_extent(&self, target: ScrollTarget<ElementId>) -> Size {
        Layout::scroll_extent(&self.document, target)
    }

    fn client_rect(&self, target: ScrollTarget<ElementId>) -> Rect {
        Layout::client_rect(&self.document, target)
    }
}

impl Platform<ElementId> for DomHost {
    fn add_listeners(&mut self, listeners: Listeners) {
        self.listeners |= listeners;
    }

    fn remove_listeners(&mut self, listeners: Listeners) {
        self.listeners.remove(listeners);
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.push((id, period));
        id
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.timers.retain(|(t, _)| *t != timer);
    }

    fn scroll_by(&mut self, target: ScrollTarget<ElementId>, delta: Vec2) {
        let applied = match target {
            ScrollTarget::Window => self.document.scroll_window_by(delta),
            ScrollTarget::Element(id) => self.document.scroll_by(id, delta),
        };
        if applied != delta {
            log::trace!("scroll clamped: asked {delta:?}, applied {applied:?}");
        }
    }
}
