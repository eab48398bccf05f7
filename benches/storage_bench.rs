//! Benchmarks for flatkv storage operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use flatkv::harness::random_string;
use flatkv::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn random_entries(count: usize) -> Vec<(String, String)> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| (random_string(&mut rng, 16), random_string(&mut rng, 64)))
        .collect()
}

fn fresh_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path().join("bench.db")).unwrap();
    (temp_dir, store)
}

fn storage_benchmarks(c: &mut Criterion) {
    let entries = random_entries(1000);

    // Every put rewrites the whole file, so cost grows with store size
    c.bench_function("put_1000_sequential", |b| {
        b.iter_batched(
            fresh_store,
            |(temp, store)| {
                for (key, value) in &entries {
                    store.put(key.as_bytes(), value.as_bytes()).unwrap();
                }
                (temp, store)
            },
            BatchSize::PerIteration,
        )
    });

    let (_temp, store) = fresh_store();
    for (key, value) in &entries {
        store.put(key.as_bytes(), value.as_bytes()).unwrap();
    }

    c.bench_function("get_hit", |b| {
        let key = entries[500].0.as_bytes();
        b.iter(|| store.get(key))
    });

    c.bench_function("reopen_1000", |b| {
        let path = store.path().to_path_buf();
        b.iter(|| Store::open_path(&path).unwrap().len())
    });
}

criterion_group!(benches, storage_benchmarks);
criterion_main!(benches);
