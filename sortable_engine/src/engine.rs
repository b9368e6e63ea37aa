// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop engine.
//!
//! ## States
//!
//! - **Idle**: no [`DragSession`].
//! - **Delayed**: a registered node was pressed and the press timer of
//!   [`SortableConfig::press_delay`] is running. Moving the pointer by
//!   [`SortableConfig::press_threshold`] aborts the press.
//! - **Pressed**: a registered node was pressed; the pointer has not yet travelled
//!   [`SortableConfig::distance`].
//! - **Dragging**: the helper follows the pointer, siblings are shifted around
//!   the candidate index and the auto-scroller runs near container edges.
//!
//! With a zero `distance` and no `press_delay`, a press starts dragging at
//! once, so a plain click reports `(index, index)`.
//!
//! Release, cancel and unmount all return to Idle. Each of them stops the
//! auto-scroll timer before touching anything else, and removes exactly the
//! document listeners and press timer the press installed.
//!
//! ## Reordering
//!
//! The dragged node's position is projected into the container's content
//! coordinates: its edge offset, plus how far the content scrolled under the
//! pointer, plus the pointer translate. The registered node whose own edge
//! offset is nearest (squared distance over the enabled axes) becomes the
//! candidate index. Candidates are scanned by ascending index, so on a tie the
//! lower index wins.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Insets, Point, Rect, Vec2};

use crate::auto_scroll::{AutoScrollConfig, AutoScroller};
use crate::config::{ConfigError, SortableConfig};
use crate::geometry::{
    delta, event_coordinates, limit, margin_offset, nested_scroll_offsets, scrollable_ancestors,
    scrolling_parent,
};
use crate::manager::{Manager, RegistryError};
use crate::node::SortableNode;
use crate::scroll::ScrollCoordinator;
use crate::types::{
    Axis, Collection, DropChange, Host, Key, Layout, Listeners, NodeKey, Platform, PointerButton,
    PointerEvent, ScrollTarget, SortEnd, SortOver, SortStart, TimerId,
};

/// Phase of a live session.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DragPhase {
    /// Pressed, waiting for the press delay.
    Delayed,
    /// Pressed, below the activation distance.
    Pressed,
    /// Dragging.
    Dragging,
}

/// State captured at press and updated while the pointer moves.
#[derive(Clone, Debug)]
pub struct DragSession<N> {
    key: NodeKey,
    collection: Collection,
    index: usize,
    phase: DragPhase,
    container: N,
    initial_position: Point,
    delta: Vec2,
    translate: Vec2,
    node_rect: Rect,
    container_rect: Rect,
    margin: Insets,
    margin_offset: Vec2,
    edge_offset: Vec2,
    container_ancestors: Vec<N>,
    container_nested_scroll: Vec2,
    min_translate: Vec2,
    max_translate: Vec2,
    new_index: usize,
    listeners: Listeners,
    press_timer: Option<TimerId>,
    related_position: Vec2,
}

impl<N: Copy> DragSession<N> {
    /// Key of the dragged node.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Collection of the dragged node.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Index of the dragged node at press.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Container whose content coordinates the reorder runs in.
    pub fn container(&self) -> N {
        self.container
    }

    /// Pointer travel since press.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Helper offset from its initial position, after axis projection and edge locking.
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Candidate index the node drops at if released now.
    pub fn new_index(&self) -> usize {
        self.new_index
    }

    /// Running press-delay timer, while [`DragPhase::Delayed`].
    pub fn press_timer(&self) -> Option<TimerId> {
        self.press_timer
    }

    /// Visible rect of the scroll container at press.
    pub fn container_rect(&self) -> Rect {
        self.container_rect
    }

    /// Translate bounds at which the item's center meets the container edges.
    pub fn translate_bounds(&self) -> (Vec2, Vec2) {
        (self.min_translate, self.max_translate)
    }
}

/// Host-agnostic sortable engine for one scope of [`SortableNode`]s.
///
/// Generic over the host node handle `N`; every host call goes through a
/// [`Host`] (or just [`Layout`]) passed to each operation.
pub struct SortableEngine<N> {
    config: SortableConfig,
    manager: Manager<N>,
    scroll: ScrollCoordinator<N>,
    auto_scroller: AutoScroller,
    container: Option<N>,
    session: Option<DragSession<N>>,
    on_drop_change: Option<Box<dyn FnMut(usize, usize)>>,
    on_sort_start: Option<Box<dyn FnMut(SortStart)>>,
    on_sort_end: Option<Box<dyn FnMut(SortEnd)>>,
    should_cancel_start: Option<Box<dyn FnMut(&PointerEvent) -> bool>>,
}

impl<N: fmt::Debug> fmt::Debug for SortableEngine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableEngine")
            .field("config", &self.config)
            .field("manager", &self.manager)
            .field("container", &self.container)
            .field("session", &self.session)
            .field("on_drop_change", &self.on_drop_change.is_some())
            .field("on_sort_start", &self.on_sort_start.is_some())
            .field("on_sort_end", &self.on_sort_end.is_some())
            .field("should_cancel_start", &self.should_cancel_start.is_some())
            .finish_non_exhaustive()
    }
}

impl<N: Copy + PartialEq + fmt::Debug> SortableEngine<N> {
    /// Create an engine after validating `config`.
    pub fn new(config: SortableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            auto_scroller: AutoScroller::new(AutoScrollConfig::from(&config)),
            config,
            manager: Manager::new(),
            scroll: ScrollCoordinator::new(),
            container: None,
            session: None,
            on_drop_change: None,
            on_sort_start: None,
            on_sort_end: None,
            should_cancel_start: None,
        })
    }

    /// Use `container` as the list element instead of each node's parent.
    pub fn with_container(mut self, container: N) -> Self {
        self.container = Some(container);
        self
    }

    /// Replace the explicit list element; `None` falls back to the node's parent.
    pub fn set_container(&mut self, container: Option<N>) {
        self.container = container;
    }

    /// Install the callback receiving `(old_index, new_index)` on every completed drag.
    pub fn on_drop_change(&mut self, callback: impl FnMut(usize, usize) + 'static) {
        self.on_drop_change = Some(Box::new(callback));
    }

    /// Install the callback run when a press turns into a drag.
    pub fn on_sort_start(&mut self, callback: impl FnMut(SortStart) + 'static) {
        self.on_sort_start = Some(Box::new(callback));
    }

    /// Install the callback run when a started drag is dropped or cancelled.
    ///
    /// Unmounting mid-drag runs neither this nor `on_drop_change`.
    pub fn on_sort_end(&mut self, callback: impl FnMut(SortEnd) + 'static) {
        self.on_sort_end = Some(Box::new(callback));
    }

    /// Install a filter that rejects presses before anything else is looked at.
    pub fn should_cancel_start(&mut self, filter: impl FnMut(&PointerEvent) -> bool + 'static) {
        self.should_cancel_start = Some(Box::new(filter));
    }

    /// Active configuration.
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// The node registry.
    pub fn manager(&self) -> &Manager<N> {
        &self.manager
    }

    /// The node registry, mutably; use it to [`apply_move`](Manager::apply_move) after a drop.
    pub fn manager_mut(&mut self) -> &mut Manager<N> {
        &mut self.manager
    }

    /// Live session, if a node is pressed or dragged.
    pub fn session(&self) -> Option<&DragSession<N>> {
        self.session.as_ref()
    }

    /// The auto-scroller; its [`timer`](AutoScroller::timer) is the only id
    /// [`on_auto_scroll_tick`](Self::on_auto_scroll_tick) accepts.
    pub fn auto_scroller(&self) -> &AutoScroller {
        &self.auto_scroller
    }

    /// Mount hook: register a node.
    pub fn register_sortable_node(
        &mut self,
        node: SortableNode<N>,
    ) -> Result<NodeKey, RegistryError> {
        self.manager.register(node)
    }

    /// Unmount hook: unregister a node by identity.
    ///
    /// Unregistering the dragged node mid-drag is allowed; the drag then drops
    /// back at its original index.
    pub fn un_register_sortable_node(&mut self, key: NodeKey) -> Option<SortableNode<N>> {
        self.manager.unregister(key)
    }

    /// Press hook for a draggable child; same as [`on_pointer_down`](Self::on_pointer_down).
    pub fn on_start_drag<H: Host<N> + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        key: NodeKey,
    ) -> bool {
        self.on_pointer_down(host, event, key)
    }

    /// Start a session on the node `key`. Returns whether a session started.
    pub fn on_pointer_down<H: Host<N> + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        key: NodeKey,
    ) -> bool {
        if self.session.is_some() || event.button == PointerButton::Secondary {
            return false;
        }
        if self.should_cancel_start.as_mut().is_some_and(|f| f(event)) {
            log::debug!("press rejected by filter");
            return false;
        }
        let Some(node) = self.manager.get(key) else {
            log::warn!("press on unregistered node {key:?}");
            return false;
        };
        if node.is_disabled() {
            return false;
        }
        let (element, collection, index) = (node.node(), node.collection(), node.index());
        let initial_position = event_coordinates(event);
        if self.config.use_drag_handle {
            let on_handle = node
                .handle()
                .and_then(|h| host.bounding_rect(h))
                .is_some_and(|r| r.contains(initial_position));
            if !on_handle {
                return false;
            }
        }
        let Some(container) = self.container.or_else(|| host.parent(element)) else {
            log::warn!("no container for node {element:?}");
            return false;
        };
        let Some(node_rect) = self
            .manager
            .get_mut(key)
            .and_then(|n| n.cached_rect(&*host))
        else {
            log::warn!("node {element:?} is not attached");
            return false;
        };

        let target = if self.config.is_scrollable_window {
            ScrollTarget::Window
        } else {
            ScrollTarget::Element(scrolling_parent(&*host, container).unwrap_or(container))
        };
        self.scroll.set_scrollable_container(&*host, target);
        let container_rect = host.client_rect(target);

        let margin = host.margin(element);
        let margin_offset = margin_offset(margin, host.gap(container));
        let edge_offset = self
            .manager
            .get_mut(key)
            .map(|n| n.cached_edge_offset(&*host, container))
            .unwrap_or(Vec2::ZERO);
        let container_ancestors: Vec<N> = scrollable_ancestors(&*host, container)
            .into_iter()
            .filter(|a| target != ScrollTarget::Element(*a))
            .collect();
        let container_nested_scroll = nested_scroll_offsets(&*host, &container_ancestors);

        let half = node_rect.size().to_vec2() / 2.0;
        let origin = node_rect.origin().to_vec2();
        let min_translate = self.config.axis.project(
            Vec2::new(container_rect.x0, container_rect.y0) - origin - half,
        );
        let max_translate = self.config.axis.project(
            Vec2::new(container_rect.x1, container_rect.y1) - origin - half,
        );

        self.manager.set_active(Some(key));
        let listeners = Listeners::MOVE | Listeners::END;
        host.add_listeners(listeners);

        let armed = self.config.distance <= 0.0;
        let press_timer = (armed && !self.config.press_delay.is_zero())
            .then(|| host.set_interval(self.config.press_delay));
        let phase = if press_timer.is_some() {
            DragPhase::Delayed
        } else {
            DragPhase::Pressed
        };
        log::debug!(
            "drag armed: node {element:?} at index {index} in {collection:?}, container {container:?}"
        );
        self.session = Some(DragSession {
            key,
            collection,
            index,
            phase,
            container,
            initial_position,
            delta: Vec2::ZERO,
            translate: Vec2::ZERO,
            node_rect,
            container_rect,
            margin,
            margin_offset,
            edge_offset,
            container_ancestors,
            container_nested_scroll,
            min_translate,
            max_translate,
            new_index: index,
            listeners,
            press_timer,
            related_position: initial_position - container_rect.origin(),
        });
        if armed && press_timer.is_none() {
            self.begin_drag(&*host);
        }
        true
    }

    /// Press-delay timer callback. Starts the drag; returns whether it did.
    ///
    /// Ticks from any timer other than the session's press timer are ignored.
    pub fn on_press_delay<H: Host<N> + ?Sized>(&mut self, host: &mut H, timer: TimerId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.phase != DragPhase::Delayed || session.press_timer != Some(timer) {
            return false;
        }
        session.press_timer = None;
        host.clear_interval(timer);
        self.begin_drag(&*host);
        true
    }

    /// Track the pointer. Returns a [`SortOver`] when the candidate index changed.
    pub fn on_pointer_move<H: Host<N> + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Option<SortOver> {
        let position = event_coordinates(event);
        let session = self.session.as_ref()?;
        let (phase, travel) = (session.phase, delta(position, session.initial_position));
        match phase {
            DragPhase::Delayed => {
                let threshold = self.config.press_threshold;
                if threshold <= 0.0 || manhattan(travel) >= threshold {
                    log::debug!("press aborted by movement before the delay elapsed");
                    self.cancel(host);
                }
                return None;
            }
            DragPhase::Pressed => {
                if manhattan(travel) < self.config.distance {
                    return None;
                }
                self.begin_drag(&*host);
            }
            DragPhase::Dragging => {}
        }
        self.track(&*host, travel);
        let over = self.reorder(&*host);

        let Some(session) = self.session.as_ref() else {
            return over;
        };
        if self.config.disable_auto_scroll {
            self.auto_scroller.clear::<N, H>(host);
        } else {
            let descriptor = *self.scroll.descriptor();
            self.auto_scroller.update::<N, H>(
                host,
                session.delta,
                session.related_position,
                &descriptor,
            );
        }
        over
    }

    /// Finish the session. Emits a [`DropChange`] if the drag had started.
    ///
    /// The release position is applied before the drop index is read.
    pub fn on_pointer_up<H: Host<N> + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Option<DropChange> {
        self.auto_scroller.clear::<N, H>(host);
        if self.is_dragging() {
            let position = event_coordinates(event);
            if let Some(initial) = self.session.as_ref().map(|s| s.initial_position) {
                self.track(&*host, delta(position, initial));
                self.reorder(&*host);
            }
        }
        let session = self.end_session(host)?;
        if session.phase != DragPhase::Dragging {
            log::debug!("press released before the drag started");
            return None;
        }
        let change = DropChange {
            collection: session.collection,
            old_index: session.index,
            new_index: session.new_index,
        };
        log::debug!("drop: {} -> {}", change.old_index, change.new_index);
        if let Some(callback) = self.on_drop_change.as_mut() {
            callback(change.old_index, change.new_index);
        }
        if let Some(callback) = self.on_sort_end.as_mut() {
            callback(SortEnd::Dropped(change));
        }
        Some(change)
    }

    /// Abort the session without reporting a reorder. Returns whether one was live.
    pub fn cancel<P: Platform<N> + ?Sized>(&mut self, host: &mut P) -> bool {
        self.auto_scroller.clear::<N, P>(host);
        let Some(session) = self.end_session(host) else {
            return false;
        };
        log::debug!("drag cancelled");
        if let (DragPhase::Dragging, Some(callback)) = (session.phase, self.on_sort_end.as_mut()) {
            callback(SortEnd::Cancelled {
                collection: session.collection,
                index: session.index,
            });
        }
        true
    }

    /// Keyboard hook: Escape cancels a live session.
    pub fn on_key_down<H: Host<N> + ?Sized>(&mut self, host: &mut H, key: Key) -> bool {
        match key {
            Key::Escape => self.cancel(host),
            Key::Other => false,
        }
    }

    /// Something scrolled while dragging; re-sort against the new scroll deltas.
    pub fn on_scroll<L: Layout<N> + ?Sized>(&mut self, layout: &L) -> Option<SortOver> {
        if !self.is_dragging() {
            return None;
        }
        self.scroll.refresh(layout);
        self.reorder(layout)
    }

    /// Timer callback. Scrolls the container one step and re-sorts.
    ///
    /// Ticks from any timer other than the running one are ignored. The
    /// auto-scroller goes idle once the container cannot scroll any further.
    pub fn on_auto_scroll_tick<H: Host<N> + ?Sized>(
        &mut self,
        host: &mut H,
        timer: TimerId,
    ) -> Option<SortOver> {
        if self.auto_scroller.timer() != Some(timer) || !self.is_dragging() {
            return None;
        }
        let target = self.scroll.target()?;
        let velocity = self.auto_scroller.velocity();
        log::trace!("auto-scroll tick {timer:?}: {velocity:?}");
        host.scroll_by(target, velocity);
        let descriptor = *self.scroll.refresh(&*host);
        self.auto_scroller.stop_at_limits::<N, H>(host, &descriptor);
        self.reorder(&*host)
    }

    /// Teardown: no timer, no listeners and no session afterwards. Never emits.
    pub fn unmount<H: Host<N> + ?Sized>(&mut self, host: &mut H) {
        self.auto_scroller.clear::<N, H>(host);
        if self.end_session(host).is_some() {
            log::debug!("drag dropped on unmount");
        }
    }

    fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase == DragPhase::Dragging)
    }

    /// Enter [`DragPhase::Dragging`]: mark the node and place the helper.
    fn begin_drag<L: Layout<N> + ?Sized>(&mut self, layout: &L) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.phase = DragPhase::Dragging;
        let (start, travel) = (
            SortStart {
                collection: session.collection,
                index: session.index,
            },
            session.delta,
        );
        if let Some(node) = self.manager.get_mut(session.key) {
            node.set_active_state(true);
        }
        log::debug!("drag started at index {}", start.index);
        if let Some(callback) = self.on_sort_start.as_mut() {
            callback(start);
        }
        self.track(layout, travel);
    }

    /// Update delta, translate and helper position for a pointer travel.
    fn track<L: Layout<N> + ?Sized>(&mut self, layout: &L, travel: Vec2) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.delta = travel;
        let mut translate = self.config.axis.project(travel);
        if self.config.lock_to_container_edges {
            let size = session.node_rect.size();
            let half = size.to_vec2() / 2.0;
            let (start, end) = self.config.lock_offset;
            let min = session.min_translate + half - start.resolve(size);
            let max = session.max_translate - half + end.resolve(size);
            if self.config.axis.contains(Axis::X) {
                translate.x = limit(min.x, max.x, translate.x);
            }
            if self.config.axis.contains(Axis::Y) {
                translate.y = limit(min.y, max.y, translate.y);
            }
        }
        if let Some(lock) = self.config.lock_axis {
            translate = lock.project(translate);
        }
        session.translate = translate;
        let helper = session.node_rect.origin() - Vec2::new(session.margin.x0, session.margin.y0)
            + translate;
        if let Some(node) = self.manager.get_mut(session.key) {
            node.set_helper_position(Some(helper));
        }
        self.scroll.refresh(layout);
        log::trace!("drag move: delta {travel:?}, translate {translate:?}");
    }

    fn reorder<L: Layout<N> + ?Sized>(&mut self, layout: &L) -> Option<SortOver> {
        let session = self.session.as_mut()?;
        let nested = nested_scroll_offsets(layout, &session.container_ancestors)
            - session.container_nested_scroll;
        let projected =
            session.edge_offset + self.scroll.content_delta() + nested + session.translate;
        reorder_slots(
            &mut self.manager,
            session,
            layout,
            self.config.axis,
            projected,
        )
    }

    fn end_session<P: Platform<N> + ?Sized>(&mut self, host: &mut P) -> Option<DragSession<N>> {
        let session = self.session.take()?;
        if let Some(timer) = session.press_timer {
            host.clear_interval(timer);
        }
        host.remove_listeners(session.listeners);
        for (_, node) in self.manager.iter_mut() {
            node.clear_drag_state();
        }
        self.manager.set_active(None);
        self.scroll.reset();
        Some(session)
    }
}

/// Position of the edge offset nearest to `projected` over `axis`.
///
/// Edges come in ascending index order; ties keep the earlier one.
fn closest(slots: impl IntoIterator<Item = Vec2>, projected: Vec2, axis: Axis) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (pos, edge) in slots.into_iter().enumerate() {
        let d = axis.project(projected - edge).hypot2();
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((pos, d));
        }
    }
    best.map(|(pos, _)| pos)
}

fn reorder_slots<N: Copy + PartialEq + fmt::Debug, L: Layout<N> + ?Sized>(
    manager: &mut Manager<N>,
    session: &mut DragSession<N>,
    layout: &L,
    axis: Axis,
    projected: Vec2,
) -> Option<SortOver> {
    let mut slots: Vec<(NodeKey, usize, Vec2)> = Vec::new();
    for key in manager.ordered(session.collection) {
        if let Some(node) = manager.get_mut(key) {
            let edge = node.cached_edge_offset(layout, session.container);
            slots.push((key, node.index(), edge));
        }
    }

    let new_index = if manager.contains(session.key) {
        closest(slots.iter().map(|s| s.2), projected, axis)
            .map(|pos| slots[pos].1)
            .unwrap_or(session.index)
    } else {
        log::warn!("dragged node {:?} vanished; keeping index", session.key);
        session.index
    };

    let old = session.index;
    let grid = axis.contains(Axis::all());
    let size = session.node_rect.size();
    let step = axis.project(Vec2::new(size.width, size.height) + session.margin_offset);
    for (pos, &(key, index, edge)) in slots.iter().enumerate() {
        if key == session.key {
            continue;
        }
        let shift = if new_index < old && index >= new_index && index < old {
            Some(if grid {
                slots.get(pos + 1).map_or(Vec2::ZERO, |n| n.2 - edge)
            } else {
                step
            })
        } else if new_index > old && index > old && index <= new_index {
            Some(if grid {
                pos.checked_sub(1)
                    .and_then(|p| slots.get(p))
                    .map_or(Vec2::ZERO, |p| p.2 - edge)
            } else {
                -step
            })
        } else {
            None
        };
        if let Some(node) = manager.get_mut(key) {
            node.set_translate(shift);
        }
    }

    if new_index == session.new_index {
        return None;
    }
    let over = SortOver {
        collection: session.collection,
        index: old,
        old_index: session.new_index,
        new_index,
    };
    session.new_index = new_index;
    log::trace!("sort over: {} -> {}", over.old_index, over.new_index);
    Some(over)
}

fn manhattan(v: Vec2) -> f64 {
    let x = if v.x < 0.0 { -v.x } else { v.x };
    let y = if v.y < 0.0 { -v.y } else { v.y };
    x + y
}
