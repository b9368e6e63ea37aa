// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scroll a long list while the pointer rests near its bottom edge.
//!
//! The host owns the timers: every "frame" below stands for one interval
//! period, and the demo forwards a tick for each running timer.
//!
//! Run:
//! - `cargo run -p sortable_demos --example auto_scroll`

use kurbo::{Point, Size, Vec2};
use sortable_dom::{Document, Element, Overflow};
use sortable_engine::adapters::dom::DomHost;
use sortable_engine::config::SortableConfig;
use sortable_engine::engine::SortableEngine;
use sortable_engine::node::SortableNode;
use sortable_engine::types::{Layout, PointerEvent, ScrollTarget};

const ROW_H: f64 = 30.0;

fn main() {
    let mut doc = Document::new(Size::new(400.0, 400.0));
    let list = doc.insert(
        None,
        Element {
            size: Size::new(200.0, 300.0),
            overflow: Overflow::SCROLL_Y,
            ..Default::default()
        },
    );
    let rows: Vec<_> = (0..50)
        .map(|i| {
            doc.insert(
                Some(list),
                Element {
                    offset: Vec2::new(0.0, i as f64 * ROW_H),
                    size: Size::new(200.0, ROW_H),
                    ..Default::default()
                },
            )
        })
        .collect();
    let mut host = DomHost::new(doc);

    let mut engine = SortableEngine::new(SortableConfig {
        max_speed: 20.0,
        ..Default::default()
    })
    .expect("valid config");
    let keys: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            engine
                .register_sortable_node(SortableNode::new(*row, i))
                .expect("indices are unique")
        })
        .collect();

    let start = Point::new(100.0, 15.0);
    engine.on_pointer_down(&mut host, &PointerEvent::mouse(start), keys[0]);
    // 4px above the bottom edge.
    let hold = Point::new(100.0, 296.0);
    engine.on_pointer_move(&mut host, &PointerEvent::mouse(hold));

    for frame in 0..40 {
        let Some((timer, _)) = host.pending_timers().first().copied() else {
            break;
        };
        let over = engine.on_auto_scroll_tick(&mut host, timer);
        let scroll = host.scroll_offset(ScrollTarget::Element(list));
        if let Some(over) = over {
            println!("frame {frame:>2}: scroll {:>6.1}, over index {}", scroll.y, over.new_index);
        }
    }

    let change = engine.on_pointer_up(&mut host, &PointerEvent::mouse(hold));
    println!("drop: {change:?}");
    println!("timers left: {}", host.pending_timers().len());
}
