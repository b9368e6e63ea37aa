// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use sortable_dom::{Document, Element, ElementId, Overflow};
use sortable_engine::adapters::dom::DomHost;
use sortable_engine::config::SortableConfig;
use sortable_engine::engine::SortableEngine;
use sortable_engine::node::SortableNode;
use sortable_engine::types::{Axis, PointerEvent};

const CELL: f64 = 20.0;

/// `n` cells laid out `cols` per row inside a scrollable container.
fn setup(n: usize, cols: usize, axis: Axis) -> (DomHost, SortableEngine<ElementId>) {
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let list = doc.insert(
        None,
        Element {
            size: Size::new(cols as f64 * CELL, 600.0),
            overflow: Overflow::SCROLL_Y,
            ..Default::default()
        },
    );
    let mut engine = SortableEngine::new(SortableConfig {
        axis,
        disable_auto_scroll: true,
        ..Default::default()
    })
    .unwrap();
    for i in 0..n {
        let cell = doc.insert(
            Some(list),
            Element {
                offset: Vec2::new((i % cols) as f64 * CELL, (i / cols) as f64 * CELL),
                size: Size::new(CELL, CELL),
                ..Default::default()
            },
        );
        engine
            .register_sortable_node(SortableNode::new(cell, i))
            .unwrap();
    }
    (DomHost::new(doc), engine)
}

fn press(host: &mut DomHost, engine: &mut SortableEngine<ElementId>) -> Point {
    let start = Point::new(CELL / 2.0, CELL / 2.0);
    let key = engine.manager().ordered(Default::default())[0];
    engine.on_pointer_down(host, &PointerEvent::mouse(start), key);
    start
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");
    for &n in &[100_usize, 1000, 5000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("move_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut host, mut engine) = setup(n, 1, Axis::Y);
                    let start = press(&mut host, &mut engine);
                    (host, engine, start)
                },
                |(mut host, mut engine, start)| {
                    for step in 1..=16 {
                        let pos = start + Vec2::new(0.0, step as f64 * 17.0);
                        black_box(engine.on_pointer_move(&mut host, &PointerEvent::mouse(pos)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[100_usize, 1000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("move_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut host, mut engine) = setup(n, 10, Axis::all());
                    let start = press(&mut host, &mut engine);
                    (host, engine, start)
                },
                |(mut host, mut engine, start)| {
                    for step in 1..=16 {
                        let d = step as f64 * 13.0;
                        let pos = start + Vec2::new(d % (10.0 * CELL), d);
                        black_box(engine.on_pointer_move(&mut host, &PointerEvent::mouse(pos)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_list, bench_grid);
criterion_main!(benches);
