//! flatkv CLI
//!
//! Acceptance tests, insert benchmark and one-shot operations on a store file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flatkv::harness::{self, BenchmarkOptions};
use flatkv::Store;
use tracing_subscriber::{fmt, EnvFilter};

/// flatkv CLI
#[derive(Parser, Debug)]
#[command(name = "flatkv")]
#[command(about = "CLI for the flatkv key-value store")]
#[command(version)]
struct Args {
    /// Backing file (defaults depend on the command)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run acceptance criteria tests
    Test,

    /// Run performance benchmark
    Benchmark {
        /// Inserts per run
        #[arg(short, long, default_value = "1000")]
        keys: usize,

        /// Measured runs
        #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,

        /// Warm-up runs
        #[arg(short, long, default_value = "2")]
        warmup: u32,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Print every entry
    Dump,
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,flatkv=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> flatkv::Result<ExitCode> {
    match args.command {
        Commands::Test => {
            let path = args.file.unwrap_or_else(|| PathBuf::from("test_data.db"));
            let mut all_passed = true;
            for result in harness::run_scenarios(&path) {
                println!("=== {} ===", result.name);
                match result.outcome {
                    harness::Outcome::Pass => println!("PASS: {}", result.name),
                    harness::Outcome::Fail(reason) => {
                        all_passed = false;
                        println!("FAIL: {}: {}", result.name, reason);
                    }
                }
            }
            println!("=== done ===");
            Ok(if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Benchmark {
            keys,
            runs,
            warmup,
        } => {
            let path = args.file.unwrap_or_else(|| PathBuf::from("bench_data.db"));
            let options = BenchmarkOptions {
                keys,
                runs,
                warmup,
                ..BenchmarkOptions::default()
            };
            let report = harness::run_benchmark(&path, &options)?;
            println!(
                "Results: {} inserts, avg {:.2}ms, {:.0} ops/sec",
                report.inserts,
                report.average_ms(),
                report.ops_per_sec()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Get { key } => {
            let store = open(args.file)?;
            let found = store.get(key.as_bytes());
            store.close()?;
            match found {
                Some(value) => {
                    println!("{}", String::from_utf8_lossy(&value));
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("(not found)");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Set { key, value } => {
            let store = open(args.file)?;
            store.put(key.as_bytes(), value.as_bytes())?;
            store.close()?;
            println!("OK");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Del { key } => {
            let store = open(args.file)?;
            store.delete(key.as_bytes())?;
            store.close()?;
            println!("OK");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Dump => {
            let store = open(args.file)?;
            for (key, value) in store.entries() {
                println!(
                    "{}\t{}",
                    String::from_utf8_lossy(&key),
                    String::from_utf8_lossy(&value)
                );
            }
            store.close()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open(file: Option<PathBuf>) -> flatkv::Result<Store> {
    let path = file.unwrap_or_else(|| PathBuf::from("flatkv.db"));
    tracing::debug!("Using data file {}", path.display());
    Store::open_path(path)
}
