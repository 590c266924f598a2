use propcopy::{
    config::RegistryConfig,
    obs::{MetricsEvent, MetricsSink},
    prelude::*,
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc, Barrier,
        atomic::{AtomicU64, Ordering},
    },
    thread,
};

///
/// Order
///

#[derive(Bean, Clone, Debug, Default, PartialEq)]
struct Order {
    id: u64,
    total: f64,
    note: Option<String>,
}

///
/// OrderSummary
///

#[derive(Bean, Clone, Debug, Default, PartialEq)]
struct OrderSummary {
    id: u64,
    total: f64,
    note: Option<String>,
}

///
/// GenerationCounter
///

#[derive(Debug, Default)]
struct GenerationCounter {
    generated: AtomicU64,
    hits: AtomicU64,
}

impl MetricsSink for GenerationCounter {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Generated { .. } => {
                self.generated.fetch_add(1, Ordering::SeqCst);
            }
            MetricsEvent::CacheHit { .. } => {
                self.hits.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

#[test]
fn concurrent_first_requests_share_one_generation() {
    const THREADS: usize = 32;

    let counter = Arc::new(GenerationCounter::default());
    let registry = CopierRegistry::new().with_sink(counter.clone());
    let barrier = Barrier::new(THREADS);

    let copiers: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.create::<Order, OrderSummary>(false, true).unwrap()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(copiers.len(), THREADS);
    assert!(copiers.iter().all(|c| Arc::ptr_eq(c, &copiers[0])));
    assert_eq!(counter.generated.load(Ordering::SeqCst), 1);
    assert_eq!(counter.hits.load(Ordering::SeqCst), THREADS as u64 - 1);
}

#[test]
fn distinct_keys_generate_independently_under_contention() {
    const THREADS: usize = 8;

    let registry = CopierRegistry::new();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for i in 0..THREADS {
            let registry = &registry;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                let use_converter = i % 2 == 0;
                let skip_null = i % 4 < 2;
                registry
                    .create::<Order, OrderSummary>(use_converter, skip_null)
                    .unwrap();
            });
        }
    });

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.stats().generations, 4);
}

#[test]
fn config_loaded_from_toml_drives_defaults() {
    let config = RegistryConfig::from_toml_str(
        r"
        [diagnostics]
        log_skipped = true

        [defaults]
        skip_null = true
        ",
    )
    .unwrap();
    let registry = CopierRegistry::with_config(config);

    let mut summary = OrderSummary {
        note: Some("gift".to_string()),
        ..OrderSummary::default()
    };
    registry
        .copy(
            &Order {
                id: 3,
                total: 9.5,
                note: None,
            },
            &mut summary,
        )
        .unwrap();

    assert_eq!(summary.id, 3);
    assert_eq!(summary.note.as_deref(), Some("gift"));
}

#[test]
fn structured_maps_copy_into_beans() {
    let registry = CopierRegistry::new();
    let source = BTreeMap::from([
        ("id".to_string(), Value::Uint32(12)),
        ("total".to_string(), Value::Float32(2.5)),
        ("note".to_string(), Value::Null),
    ]);

    let summary: OrderSummary = registry.copy_new(&source).unwrap();

    assert_eq!(
        summary,
        OrderSummary {
            id: 12,
            total: 2.5,
            note: None,
        }
    );
}

#[test]
fn clear_forces_regeneration() {
    let registry = CopierRegistry::new();

    let first = registry.create::<Order, OrderSummary>(false, false).unwrap();
    registry.clear();
    let second = registry.create::<Order, OrderSummary>(false, false).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(registry.stats().generations, 2);
    assert_eq!(registry.metrics().evicted, 1);
}
