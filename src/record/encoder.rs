//! Record Encoder
//!
//! Serializes entries into a contiguous image of the backing file.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;

use super::{check_entry, encoded_len};

/// Appends length-prefixed records to an in-memory buffer
pub struct RecordEncoder {
    /// Encoded records, in the order they were added
    buf: BytesMut,
    /// Number of records written
    record_count: usize,
}

impl RecordEncoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an encoder with room for `capacity` bytes of records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            record_count: 0,
        }
    }

    /// Append one record: [key_len][key][value_len][value]
    pub fn encode(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        check_entry(key, value)?;

        self.buf.reserve(encoded_len(key, value));
        self.buf.put_u32(key.len() as u32);
        self.buf.put_slice(key);
        self.buf.put_u32(value.len() as u32);
        self.buf.put_slice(value);

        self.record_count += 1;
        Ok(())
    }

    /// Number of records encoded so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of bytes encoded so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the encoder and return the file image
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for RecordEncoder {
    fn default() -> Self {
        Self::new()
    }
}
