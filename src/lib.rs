//! # flatkv
//!
//! A small durable key-value store:
//! - In-memory map as the source of truth for reads
//! - Whole-map rewrite of a single backing file on every mutation
//! - Flat length-prefixed record format, reloaded on open
//! - One exclusive lock around map and file
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Callers (threads, CLI harness)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  get / put / delete / close
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Store (Mutex)                           │
//! │              HashMap<key, value> + File handle               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │ persist                 │ load (open only)
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │RecordEncoder│          │RecordDecoder│
//!   └──────┬──────┘          └──────▲──────┘
//!          │  truncate + rewrite    │  read whole file
//!          └──────────► file ───────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod harness;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, RecordField, Result};
pub use config::Config;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
