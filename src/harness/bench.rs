//! Insert throughput benchmark
//!
//! Times sequential puts of random entries into a fresh store per run.

use std::path::Path;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::Result;
use crate::store::Store;

use super::remove_data_file;

/// Alphabet for generated keys and values
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Benchmark parameters
#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    /// Entries inserted per run
    pub keys: usize,
    /// Measured runs
    pub runs: u32,
    /// Unmeasured runs before measuring
    pub warmup: u32,
    pub key_len: usize,
    pub value_len: usize,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            keys: 1000,
            runs: 10,
            warmup: 2,
            key_len: 16,
            value_len: 64,
        }
    }
}

/// Averaged benchmark timings
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub inserts: usize,
    pub runs: u32,
    pub average: Duration,
}

impl BenchmarkReport {
    /// Average duration of one run in milliseconds
    pub fn average_ms(&self) -> f64 {
        self.average.as_secs_f64() * 1000.0
    }

    /// Inserts per second over an average run
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.average.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.inserts as f64 / secs
    }
}

/// Generate a random string of `len` characters from `a-z0-9`
pub fn random_string<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Run warm-up and measured insert runs against `path`
///
/// The backing file is removed before every run and after the last one.
pub fn run_benchmark(path: &Path, options: &BenchmarkOptions) -> Result<BenchmarkReport> {
    let mut rng = rand::thread_rng();
    let entries: Vec<(String, String)> = (0..options.keys)
        .map(|_| {
            (
                random_string(&mut rng, options.key_len),
                random_string(&mut rng, options.value_len),
            )
        })
        .collect();

    tracing::info!("Warming up ({} runs)...", options.warmup);
    for _ in 0..options.warmup {
        insert_run(path, &entries)?;
    }

    tracing::info!("Benchmarking sequential inserts ({} runs)...", options.runs);
    let mut total = Duration::ZERO;
    for _ in 0..options.runs {
        total += insert_run(path, &entries)?;
    }
    remove_data_file(path)?;

    let average = if options.runs == 0 {
        Duration::ZERO
    } else {
        total / options.runs
    };

    Ok(BenchmarkReport {
        inserts: options.keys,
        runs: options.runs,
        average,
    })
}

/// One run: fresh store, timed puts, close (untimed)
fn insert_run(path: &Path, entries: &[(String, String)]) -> Result<Duration> {
    remove_data_file(path)?;
    let store = Store::open_path(path)?;

    let start = Instant::now();
    for (key, value) in entries {
        store.put(key.as_bytes(), value.as_bytes())?;
    }
    let elapsed = start.elapsed();

    store.close()?;
    Ok(elapsed)
}
