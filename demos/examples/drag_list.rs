// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder a vertical list by dragging one row onto another.
//!
//! Run:
//! - `cargo run -p sortable_demos --example drag_list`

use kurbo::{Insets, Point, Size, Vec2};
use sortable_dom::{Document, Element};
use sortable_engine::adapters::dom::DomHost;
use sortable_engine::config::SortableConfig;
use sortable_engine::engine::SortableEngine;
use sortable_engine::node::SortableNode;
use sortable_engine::types::{Collection, PointerEvent};

const ROW_H: f64 = 40.0;
const GAP: f64 = 8.0;

fn main() {
    let mut items = vec!["apples", "bread", "cheese", "dates", "eggs"];

    let mut doc = Document::new(Size::new(400.0, 600.0));
    let list = doc.insert(
        None,
        Element {
            offset: Vec2::new(20.0, 20.0),
            size: Size::new(200.0, 400.0),
            ..Default::default()
        },
    );
    let rows: Vec<_> = (0..items.len())
        .map(|i| {
            doc.insert(
                Some(list),
                Element {
                    offset: Vec2::new(0.0, i as f64 * (ROW_H + GAP)),
                    size: Size::new(200.0, ROW_H),
                    margin: Insets::new(0.0, 0.0, 0.0, GAP),
                    ..Default::default()
                },
            )
        })
        .collect();
    let mut host = DomHost::new(doc);

    let mut engine = SortableEngine::new(SortableConfig::default()).expect("default config is valid");
    engine.on_drop_change(|old, new| println!("on_drop_change({old}, {new})"));
    let keys: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            engine
                .register_sortable_node(SortableNode::new(*row, i))
                .expect("indices are unique")
        })
        .collect();

    // Press in the middle of "dates" (index 3) and drag it upwards.
    let start = Point::new(100.0, 20.0 + 3.0 * (ROW_H + GAP) + ROW_H / 2.0);
    engine.on_pointer_down(&mut host, &PointerEvent::mouse(start), keys[3]);
    for dy in [-20.0, -60.0, -100.0, -140.0] {
        let pos = start + Vec2::new(0.0, dy);
        if let Some(over) = engine.on_pointer_move(&mut host, &PointerEvent::mouse(pos)) {
            println!("dy={dy:>6.1}: over {} -> {}", over.old_index, over.new_index);
        }
        let shifted: Vec<_> = keys
            .iter()
            .map(|k| engine.manager().get(*k).and_then(|n| n.translate()))
            .map(|t| t.map_or(0.0, |t| t.y))
            .collect();
        println!("            translates {shifted:?}");
    }

    let end = start + Vec2::new(0.0, -140.0);
    if let Some(change) = engine.on_pointer_up(&mut host, &PointerEvent::mouse(end)) {
        let item = items.remove(change.old_index);
        items.insert(change.new_index, item);
        engine
            .manager_mut()
            .apply_move(Collection::default(), change.old_index, change.new_index);
    }
    println!("items: {items:?}");
}
