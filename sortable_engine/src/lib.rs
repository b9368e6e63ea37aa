// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sortable_engine --heading-base-level=0

//! Sortable Engine: headless drag-and-drop reordering for lists and grids.
//!
//! ## Overview
//!
//! The engine tracks a pointer from press to release, moves a floating helper,
//! shifts the siblings of the dragged item to open a gap at the candidate
//! index, auto-scrolls the container when the pointer nears one of its edges,
//! and finally reports `(old_index, new_index)`.
//!
//! It owns no document. Geometry is read through [`Layout`](crate::types::Layout)
//! and side effects (document listeners, interval timers, scrolling) are
//! requested through [`Platform`](crate::types::Platform). The host renders
//! from the state on each [`SortableNode`](crate::node::SortableNode):
//! active flag, helper position and translate.
//!
//! ## Lifecycle
//!
//! 1) Register each item on mount with
//!    [`SortableEngine::register_sortable_node`](crate::engine::SortableEngine::register_sortable_node)
//!    and keep the returned [`NodeKey`](crate::types::NodeKey) to unregister it on unmount.
//! 2) Forward pointer down/move/up, Escape, scroll and timer ticks to the engine.
//!    Auto-scroll ticks go to
//!    [`on_auto_scroll_tick`](crate::engine::SortableEngine::on_auto_scroll_tick), the
//!    press-delay timer to [`on_press_delay`](crate::engine::SortableEngine::on_press_delay).
//! 3) On drop, reorder your data and call
//!    [`Manager::apply_move`](crate::manager::Manager::apply_move) so indices follow.
//!
//! ## Modules
//!
//! - [`types`]: axes, events, handles, results, and the host traits.
//! - [`geometry`]: pure helpers over a layout.
//! - [`scroll`]: scroll container tracking.
//! - [`auto_scroll`]: edge auto-scroller.
//! - [`manager`]: node registry.
//! - [`node`]: per-item state.
//! - [`engine`]: the state machine and reorder pass.
//! - [`config`]: options and validation.
//! - [`adapters`]: hosts for concrete document models (feature-gated).
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "dom_adapter")]
//! # {
//! use kurbo::{Point, Size, Vec2};
//! use sortable_dom::{Document, Element};
//! use sortable_engine::adapters::dom::DomHost;
//! use sortable_engine::config::SortableConfig;
//! use sortable_engine::engine::SortableEngine;
//! use sortable_engine::node::SortableNode;
//! use sortable_engine::types::PointerEvent;
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let list = doc.insert(None, Element { size: Size::new(200.0, 300.0), ..Default::default() });
//! let rows: Vec<_> = (0..3)
//!     .map(|i| {
//!         doc.insert(
//!             Some(list),
//!             Element {
//!                 offset: Vec2::new(0.0, i as f64 * 50.0),
//!                 size: Size::new(200.0, 50.0),
//!                 ..Default::default()
//!             },
//!         )
//!     })
//!     .collect();
//! let mut host = DomHost::new(doc);
//!
//! let mut engine = SortableEngine::new(SortableConfig::default()).unwrap();
//! let keys: Vec<_> = rows
//!     .iter()
//!     .enumerate()
//!     .map(|(i, row)| engine.register_sortable_node(SortableNode::new(*row, i)).unwrap())
//!     .collect();
//!
//! // Drag the last row to the top.
//! engine.on_pointer_down(&mut host, &PointerEvent::mouse(Point::new(20.0, 120.0)), keys[2]);
//! engine.on_pointer_move(&mut host, &PointerEvent::mouse(Point::new(20.0, 15.0)));
//! let change = engine
//!     .on_pointer_up(&mut host, &PointerEvent::mouse(Point::new(20.0, 15.0)))
//!     .unwrap();
//! assert_eq!((change.old_index, change.new_index), (2, 0));
//! # }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod adapters;
pub mod auto_scroll;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod manager;
pub mod node;
pub mod scroll;
pub mod types;
