//! # Typed Bus Dispatch Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | publish, N callbacks | linear in N, one snapshot per publish |
//! | publish, no callbacks | constant, one map lookup |
//! | subscribe + unsubscribe | constant amortized per pair |
//! | tagged sub + unsub | one extra map operation over raw ids |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::cell::Cell;
use std::rc::Rc;
use typed_bus::{EventBus, SubscriptionManager};
use typed_bus_tests::fixtures::{EventA, EventB, EventC, ScenarioEvents, Tag};

// ============================================================================
// Publish fan-out
// ============================================================================

fn bench_publish_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish-fan-out");

    for callbacks in [1usize, 8, 64, 512] {
        let bus = EventBus::<ScenarioEvents>::new();
        let hits = Rc::new(Cell::new(0u64));
        for _ in 0..callbacks {
            let counter = Rc::clone(&hits);
            let _ = bus
                .subscriber()
                .subscribe(move |a: &EventA| counter.set(counter.get() + a.x as u64));
        }
        let publisher = bus.publisher();

        group.throughput(Throughput::Elements(callbacks as u64));
        group.bench_with_input(
            BenchmarkId::new("publish", callbacks),
            &callbacks,
            |b, _| b.iter(|| black_box(publisher.publish(black_box(&EventA { x: 1, y: 0 })))),
        );
    }

    group.finish();
}

fn bench_publish_unsubscribed_type(c: &mut Criterion) {
    let bus = EventBus::<ScenarioEvents>::new();
    let _ = bus.subscriber().subscribe(|_: &EventB| {});
    let publisher = bus.publisher();

    c.bench_function("publish-no-subscribers", |b| {
        b.iter(|| black_box(publisher.publish(black_box(&EventC))))
    });
}

// ============================================================================
// Registration churn
// ============================================================================

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration-churn");

    for resident in [0usize, 100, 1_000] {
        let bus = EventBus::<ScenarioEvents>::new();
        let subscriber = bus.subscriber();
        for _ in 0..resident {
            let _ = subscriber.subscribe(|_: &EventB| {});
        }

        group.bench_with_input(
            BenchmarkId::new("raw-id", resident),
            &resident,
            |b, _| {
                b.iter(|| {
                    let id = subscriber.subscribe(|_: &EventB| {});
                    black_box(subscriber.unsubscribe::<EventB>(id))
                })
            },
        );
    }

    let bus = EventBus::<ScenarioEvents>::new();
    let mut manager = SubscriptionManager::new(bus.subscriber());
    group.bench_function("tagged", |b| {
        b.iter(|| {
            let _ = manager.sub(Tag::B, |_: &EventB| {});
            black_box(manager.unsub(Tag::B))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_publish_fan_out,
    bench_publish_unsubscribed_type,
    bench_subscribe_unsubscribe,
);
criterion_main!(benches);
