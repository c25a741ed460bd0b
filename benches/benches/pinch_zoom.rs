// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_pinch_zoom::{EventSink, TouchKind, ZoomConfig, ZoomEngine, ZoomEvent};

/// Sink that drops every event, so only engine work is measured.
struct Discard;

impl EventSink<u32> for Discard {
    fn emit(&mut self, _key: &u32, event: ZoomEvent) {
        black_box(event);
    }
}

fn bench_pinch_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinch_zoom/pinch");
    let viewport = Size::new(1080.0, 2340.0);

    for (name, content) in [
        ("wide", Size::new(4000.0, 3000.0)),
        ("tall", Size::new(1000.0, 9000.0)),
        ("square", Size::new(1080.0, 2340.0)),
    ] {
        group.bench_with_input(BenchmarkId::new("frames_64", name), &content, |b, content| {
            b.iter_batched(
                || ZoomEngine::new(0_u32, content, viewport, Discard),
                |mut engine| {
                    engine.on_touch(TouchKind::Down);
                    engine.on_scale_start(1.0, 300.0, 900.0);
                    for i in 0..64 {
                        engine.on_scale(1.0 + f64::from(i) * 0.05);
                    }
                    engine.on_touch(TouchKind::Up);
                    engine.on_scale_end();
                    black_box(engine.current_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_pan_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinch_zoom/pan");
    let viewport = Size::new(1080.0, 2340.0);
    let content = Size::new(4000.0, 3000.0);

    group.bench_function("enlarged_frames_128", |b| {
        b.iter_batched(
            || {
                let mut engine = ZoomEngine::new(0_u32, &content, viewport, Discard);
                engine.on_scale_start(1.0, 540.0, 1170.0);
                engine.on_scale(3.0);
                engine.on_touch(TouchKind::Up);
                engine.on_scale_end();
                engine
            },
            |mut engine| {
                engine.on_touch(TouchKind::Down);
                engine.on_move_start(2.0, 0.0);
                for i in 0..128 {
                    let step = f64::from(i);
                    engine.on_move(step * 7.0, step * -3.0);
                }
                engine.on_touch(TouchKind::Up);
                engine.on_move_end(896.0, -384.0);
                black_box(engine.direction());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let config = ZoomConfig::default();
    c.bench_function("pinch_zoom/scale_bounds", |b| {
        b.iter(|| {
            understory_pinch_zoom::ScaleBounds::compute(
                black_box(Size::new(4032.0, 3024.0)),
                black_box(Size::new(1080.0, 2340.0)),
                &config,
            )
        });
    });
}

criterion_group!(benches, bench_pinch_frames, bench_pan_frames, bench_bounds);
criterion_main!(benches);
