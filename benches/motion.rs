use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_rails::core::{Car, Consist, TrackMap};
use tui_rails::types::{TrackPosition, CURVE_PATH_LEN};

fn bench_resolve(c: &mut Criterion) {
    let map = TrackMap::default();
    let on_curve = TrackPosition::new(2, 3, 0.42);

    c.bench_function("resolve_curve", |b| {
        b.iter(|| map.resolve(black_box(on_curve)))
    });
}

fn bench_advance_straight(c: &mut Criterion) {
    let map = TrackMap::default();
    let start = TrackPosition::new(1, 1, 0.1);

    c.bench_function("advance_straight_with_crossing", |b| {
        b.iter(|| map.advance(black_box(start), black_box(100.0)))
    });
}

fn bench_advance_curve(c: &mut Criterion) {
    let map = TrackMap::default();
    let start = TrackPosition::new(2, 3, 0.9);

    c.bench_function("advance_curve_with_crossing", |b| {
        b.iter(|| map.advance(black_box(start), black_box(0.2 * CURVE_PATH_LEN)))
    });
}

fn bench_consist_tick(c: &mut Criterion) {
    let map = TrackMap::from_layout(&["ggg"; 12], &[" s "; 12], &["   "; 12]);
    let mut lead = Car::new(0, TrackPosition::centered(1, 4));
    for row in 5..8 {
        lead.attach(Car::new(1, TrackPosition::centered(1, row)));
    }
    let mut consist = Consist::new(lead, vec![Car::new(2, TrackPosition::centered(1, 10))]);

    c.bench_function("consist_tick_4_cars", |b| {
        b.iter(|| {
            // Forward then backward so the train never leaves the map.
            consist.lead_mut().set_speed(50.0);
            consist.tick(&map, black_box(16.0));
            consist.lead_mut().set_speed(-50.0);
            consist.tick(&map, black_box(16.0));
        })
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_advance_straight,
    bench_advance_curve,
    bench_consist_tick
);
criterion_main!(benches);
