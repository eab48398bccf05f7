//! Store Module
//!
//! The durable key-value store: an in-memory map mirrored to one backing file.
//!
//! ## Responsibilities
//! - Load the backing file into the map on open
//! - Rewrite the whole file after every mutation (truncate + rewrite)
//! - Serialize all access through one exclusive lock
//! - Sync and release the file on close

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::record::{self, RecordDecoder, RecordEncoder};

/// State guarded by the store lock
struct Inner {
    /// Current contents, keyed by raw key bytes
    map: HashMap<Vec<u8>, Vec<u8>>,

    /// Backing file; `None` once the store is closed
    file: Option<File>,
}

/// A durable key-value store backed by a single flat file
///
/// ## Concurrency Model: Single Exclusive Lock
///
/// Every operation, reads included, holds the same `Mutex` for its full
/// duration. Mutations rewrite the entire file while holding it, so there is
/// no reader/writer split. Waiters park rather than spin.
///
/// ## Durability
///
/// After `put`, `delete` or `close` returns `Ok`, the file holds exactly the
/// serialization of the map. Persist is not crash-atomic: a failure midway can
/// leave the file truncated or half written.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Map + file handle
    inner: Mutex<Inner>,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Open/create the backing file (read + write)
    /// 2. Load every record into the map
    /// 3. Ready to serve requests
    ///
    /// A corrupt file aborts the open; the handle is dropped before returning.
    pub fn open(config: Config) -> Result<Self> {
        let mut file = Self::open_file(&config)?;

        let mut map = HashMap::new();
        let loaded = Self::load(&mut file, &mut map)?;

        tracing::debug!(
            "Opened store at {} ({} entries loaded)",
            config.data_path.display(),
            loaded
        );

        Ok(Self {
            config,
            inner: Mutex::new(Inner {
                map,
                file: Some(file),
            }),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().data_path(path.as_ref()).build();
        Self::open(config)
    }

    /// Get a value by key
    ///
    /// Pure in-memory lookup; `None` means the key is absent.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let inner = self.inner.lock();
        inner.map.get(key).cloned()
    }

    /// Put a key-value pair, overwriting any previous value
    ///
    /// If persisting fails the map still holds the new value; the next
    /// successful persist brings the file back in line.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        record::check_entry(key, value)?;

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        inner.map.insert(key.to_vec(), value.to_vec());
        self.persist_locked(inner)
    }

    /// Delete a key
    ///
    /// Deleting an absent key is not an error; the file is rewritten either way.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        inner.map.remove(key);
        self.persist_locked(inner)
    }

    /// Close the store
    ///
    /// Persists the map, syncs the file and releases the handle. The handle is
    /// released even when persist or sync fails.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let mut file = inner.file.take().ok_or(FlatError::Closed)?;

        let result = self
            .persist(&mut file, &inner.map)
            .and_then(|()| file.sync_all().map_err(FlatError::from));
        drop(file);

        match &result {
            Ok(()) => tracing::debug!("Closed store at {}", self.config.data_path.display()),
            Err(e) => tracing::warn!(
                "Closing store at {} failed: {}",
                self.config.data_path.display(),
                e
            ),
        }

        result
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of entries in the map
    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().map.is_empty()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.inner.lock().map.contains_key(key)
    }

    /// Snapshot of every entry, sorted by key
    pub fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let inner = self.inner.lock();
        let mut entries: Vec<_> = inner
            .map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Whether `close` has already released the file
    pub fn is_closed(&self) -> bool {
        self.inner.lock().file.is_none()
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.data_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn open_file(config: &Config) -> Result<File> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(config.file_mode);
        }

        options.open(&config.data_path).map_err(|source| FlatError::Open {
            path: config.data_path.clone(),
            source,
        })
    }

    /// Persist with the lock held; fails if the store is closed
    fn persist_locked(&self, inner: &mut Inner) -> Result<()> {
        let file = inner.file.as_mut().ok_or(FlatError::Closed)?;
        self.persist(file, &inner.map)
    }

    /// Truncate the file and rewrite every entry
    fn persist(&self, file: &mut File, map: &HashMap<Vec<u8>, Vec<u8>>) -> Result<()> {
        let capacity = map.iter().map(|(k, v)| record::encoded_len(k, v)).sum();
        let mut encoder = RecordEncoder::with_capacity(capacity);
        for (key, value) in map {
            encoder.encode(key, value)?;
        }
        let records = encoder.record_count();
        let image = encoder.finish();

        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        file.write_all(&image)?;

        if self.config.sync_on_persist {
            file.sync_data()?;
        }

        tracing::trace!("Persisted {} records ({} bytes)", records, image.len());
        Ok(())
    }

    /// Read the whole file into `map`, returning the number of records parsed
    fn load(file: &mut File, map: &mut HashMap<Vec<u8>, Vec<u8>>) -> Result<usize> {
        file.seek(SeekFrom::Start(0))?;

        let mut image = Vec::new();
        file.read_to_end(&mut image)?;

        let mut decoder = RecordDecoder::new(image);
        let mut count = 0;
        while let Some(record) = decoder.next_record()? {
            map.insert(record.key.to_vec(), record.value.to_vec());
            count += 1;
        }

        Ok(count)
    }
}
