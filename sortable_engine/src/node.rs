// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item state the engine drives and the host renders.

use kurbo::{Point, Rect, Vec2};

use crate::geometry::edge_offset;
use crate::types::{Collection, Layout};

/// One reorderable item.
///
/// The host reads [`is_active`](Self::is_active),
/// [`helper_position`](Self::helper_position) and
/// [`translate`](Self::translate) to render the floating helper and the
/// shifted siblings.
#[derive(Clone, Debug, PartialEq)]
pub struct SortableNode<N> {
    node: N,
    index: usize,
    collection: Collection,
    handle: Option<N>,
    disabled: bool,
    active: bool,
    helper_position: Option<Point>,
    translate: Option<Vec2>,
    // Per-drag caches.
    bounding_rect: Option<Rect>,
    edge_offset: Option<Vec2>,
}

impl<N: Copy + PartialEq> SortableNode<N> {
    /// An enabled node at `index` of the default collection.
    pub fn new(node: N, index: usize) -> Self {
        Self {
            node,
            index,
            collection: Collection::default(),
            handle: None,
            disabled: false,
            active: false,
            helper_position: None,
            translate: None,
            bounding_rect: None,
            edge_offset: None,
        }
    }

    /// Place the node in `collection`.
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    /// Use `handle` as the only area that starts a drag when
    /// [`use_drag_handle`](crate::config::SortableConfig::use_drag_handle) is set.
    pub fn with_handle(mut self, handle: N) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Mark the node as not draggable.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Host handle.
    pub fn node(&self) -> N {
        self.node
    }

    /// Position within the collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Collection tag.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Drag handle, if any.
    pub fn handle(&self) -> Option<N> {
        self.handle
    }

    /// Whether a press on this node is ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether this node is the one being dragged.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Viewport position of the floating helper while dragging.
    pub fn helper_position(&self) -> Option<Point> {
        self.helper_position
    }

    /// Offset applied to this (non-dragged) node to make room for the dragged one.
    pub fn translate(&self) -> Option<Vec2> {
        self.translate
    }

    /// Bounding rect cached for the current drag.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.bounding_rect
    }

    /// Edge offset cached for the current drag.
    pub fn edge_offset(&self) -> Option<Vec2> {
        self.edge_offset
    }

    /// Toggle the dragging visual state.
    pub fn set_active_state(&mut self, active: bool) {
        self.active = active;
    }

    /// Move the floating helper.
    pub fn set_helper_position(&mut self, position: Option<Point>) {
        self.helper_position = position;
    }

    /// Shift the node.
    pub fn set_translate(&mut self, translate: Option<Vec2>) {
        self.translate = translate;
    }

    /// Forget everything that only made sense during a drag.
    pub fn clear_drag_state(&mut self) {
        self.active = false;
        self.helper_position = None;
        self.translate = None;
        self.bounding_rect = None;
        self.edge_offset = None;
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Edge offset relative to `container`, measured once per drag.
    pub(crate) fn cached_edge_offset<L: Layout<N> + ?Sized>(
        &mut self,
        layout: &L,
        container: N,
    ) -> Vec2 {
        let node = self.node;
        *self
            .edge_offset
            .get_or_insert_with(|| edge_offset(layout, node, container))
    }

    /// Bounding rect, measured once per drag.
    pub(crate) fn cached_rect<L: Layout<N> + ?Sized>(&mut self, layout: &L) -> Option<Rect> {
        if self.bounding_rect.is_none() {
            self.bounding_rect = layout.bounding_rect(self.node);
        }
        self.bounding_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drag_state_resets_everything_but_identity() {
        let mut n = SortableNode::new(7_u32, 3).with_collection(Collection(2));
        n.set_active_state(true);
        n.set_helper_position(Some(Point::new(1.0, 2.0)));
        n.set_translate(Some(Vec2::new(0.0, 10.0)));
        n.edge_offset = Some(Vec2::new(0.0, 150.0));
        n.bounding_rect = Some(Rect::new(0.0, 0.0, 1.0, 1.0));

        n.clear_drag_state();
        assert!(!n.is_active());
        assert_eq!(n.helper_position(), None);
        assert_eq!(n.translate(), None);
        assert_eq!(n.edge_offset(), None);
        assert_eq!(n.bounding_rect(), None);
        assert_eq!((n.node(), n.index(), n.collection()), (7, 3, Collection(2)));
    }
}
