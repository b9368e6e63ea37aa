// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sortable_dom --heading-base-level=0

//! Sortable DOM: a Kurbo-native, in-memory element tree.
//!
//! Sortable DOM models the small slice of a document that a drag-and-drop
//! engine needs to read: where elements sit, how big they are, their margins
//! and gaps, which of them scroll, and how far.
//!
//! - Represents a hierarchy of elements with local offsets, sizes, margins, and overflow flags.
//! - Tracks per-element scroll offsets and the window scroll, clamped to the content extent.
//! - Answers `getBoundingClientRect`-style queries in viewport coordinates.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout. Upstream code places elements by setting
//! their offsets (the `offsetLeft` / `offsetTop` pair relative to the parent's
//! content origin) and sizes; the document only composes those into client
//! rectangles and keeps scroll state consistent.
//!
//! ## API overview
//!
//! - [`Document`]: container managing elements, the viewport, and the window scroll.
//! - [`Element`]: per-element local data (offset, size, margin, gap, overflow, scroll offset).
//! - [`Overflow`]: which axes of an element may scroll.
//! - [`ElementId`]: generational handle of an element.
//!
//! ### Minimal usage
//!
//! ```
//! use sortable_dom::{Document, Element, Overflow};
//! use kurbo::{Rect, Size, Vec2};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//!
//! let list = doc.insert(
//!     None,
//!     Element { size: Size::new(200.0, 100.0), overflow: Overflow::SCROLL_Y, ..Default::default() },
//! );
//!
//! let rows: Vec<_> = (0..4)
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
//!
//! // Scrolling the list moves its rows up on screen.
//! doc.scroll_by(list, Vec2::new(0.0, 30.0));
//! assert_eq!(doc.bounding_client_rect(rows[1]), Some(Rect::new(0.0, 20.0, 200.0, 70.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::Document;
pub use types::{Element, ElementId, Overflow};
