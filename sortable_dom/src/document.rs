// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, updates, geometry queries, scrolling.

use alloc::vec::Vec;
use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::types::{Element, ElementId, Overflow};

impl Default for Document {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// An in-memory element tree plus the window (viewport) that displays it.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    viewport: Size,
    window_scroll: Vec2,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("window_scroll", &self.window_scroll)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
}

impl Document {
    /// Create an empty document shown through a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            viewport,
            window_scroll: Vec2::ZERO,
        }
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId stores 32-bit slot indices."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.node_mut(p).children.push(id);
            self.node_mut(id).parent = Some(p);
        }
        id
    }

    /// Remove an element (and its subtree) from the document.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Local data of a live element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Parent of a live element, `None` for roots and stale ids.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live element in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Update the offset relative to the parent's content origin.
    pub fn set_offset(&mut self, id: ElementId, offset: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.offset = offset;
        }
    }

    /// Update the border-box size.
    pub fn set_size(&mut self, id: ElementId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.size = size;
        }
    }

    /// Update the outer margins.
    pub fn set_margin(&mut self, id: ElementId, margin: Insets) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.margin = margin;
        }
    }

    /// Update the overflow flags. Axes that stop scrolling are reset to zero.
    pub fn set_overflow(&mut self, id: ElementId, overflow: Overflow) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.overflow = overflow;
        }
        let current = self.get(id).map(|e| e.scroll_offset).unwrap_or(Vec2::ZERO);
        self.set_scroll_offset(id, current);
    }

    /// Size of the element's content: its own size grown to contain every child's margin box.
    pub fn scroll_extent(&self, id: ElementId) -> Size {
        let Some(node) = self.node_opt(id) else {
            return Size::ZERO;
        };
        let mut w = node.element.size.width;
        let mut h = node.element.size.height;
        for child in &node.children {
            let Some(c) = self.get(*child) else {
                continue;
            };
            w = w.max(c.offset.x + c.size.width + c.margin.x1);
            h = h.max(c.offset.y + c.size.height + c.margin.y1);
        }
        Size::new(w, h)
    }

    /// Largest scroll offset the element accepts on each axis.
    pub fn max_scroll(&self, id: ElementId) -> Vec2 {
        let Some(element) = self.get(id) else {
            return Vec2::ZERO;
        };
        let extent = self.scroll_extent(id);
        let mut max = Vec2::new(
            (extent.width - element.size.width).max(0.0),
            (extent.height - element.size.height).max(0.0),
        );
        if !element.overflow.contains(Overflow::SCROLL_X) {
            max.x = 0.0;
        }
        if !element.overflow.contains(Overflow::SCROLL_Y) {
            max.y = 0.0;
        }
        max
    }

    /// Set the scroll position, clamped to the scrollable range. Returns the applied offset.
    pub fn set_scroll_offset(&mut self, id: ElementId, offset: Vec2) -> Vec2 {
        let max = self.max_scroll(id);
        let clamped = clamp_vec(offset, max);
        if let Some(n) = self.node_opt_mut(id) {
            n.element.scroll_offset = clamped;
        }
        clamped
    }

    /// Scroll an element by `delta`, clamped. Returns the distance actually scrolled.
    pub fn scroll_by(&mut self, id: ElementId, delta: Vec2) -> Vec2 {
        let Some(before) = self.get(id).map(|e| e.scroll_offset) else {
            return Vec2::ZERO;
        };
        self.set_scroll_offset(id, before + delta) - before
    }

    /// Size of the window the document is shown through.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport, re-clamping the window scroll.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.set_window_scroll(self.window_scroll);
    }

    /// Extent of the whole document: the viewport grown to contain every root element.
    pub fn document_extent(&self) -> Size {
        let mut w = self.viewport.width;
        let mut h = self.viewport.height;
        for node in self.nodes.iter().flatten().filter(|n| n.parent.is_none()) {
            let e = &node.element;
            w = w.max(e.offset.x + e.size.width + e.margin.x1);
            h = h.max(e.offset.y + e.size.height + e.margin.y1);
        }
        Size::new(w, h)
    }

    /// Current window scroll position (`pageXOffset` / `pageYOffset`).
    pub fn window_scroll(&self) -> Vec2 {
        self.window_scroll
    }

    /// Set the window scroll position, clamped. Returns the applied offset.
    pub fn set_window_scroll(&mut self, offset: Vec2) -> Vec2 {
        let extent = self.document_extent();
        let max = Vec2::new(
            (extent.width - self.viewport.width).max(0.0),
            (extent.height - self.viewport.height).max(0.0),
        );
        self.window_scroll = clamp_vec(offset, max);
        self.window_scroll
    }

    /// Scroll the window by `delta`, clamped. Returns the distance actually scrolled.
    pub fn scroll_window_by(&mut self, delta: Vec2) -> Vec2 {
        let before = self.window_scroll;
        self.set_window_scroll(before + delta) - before
    }

    /// Border box in viewport coordinates, after all ancestor and window scrolling.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        let element = self.get(id)?;
        let mut origin = Point::ZERO + element.offset - self.window_scroll;
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            let parent = self.get(p)?;
            origin += parent.offset - parent.scroll_offset;
            cursor = self.parent(p);
        }
        Some(Rect::from_origin_size(origin, element.size))
    }

    // --- internals ---

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

fn clamp_vec(v: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(v.x.max(0.0).min(max.x), v.y.max(0.0).min(max.y))
}
