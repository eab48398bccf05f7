//! Record Decoder
//!
//! Walks a file image record by record. The only clean stop is an empty
//! remainder at a record boundary; running out of bytes anywhere inside a
//! record is reported as corruption.

use bytes::{Buf, Bytes};

use crate::error::{FlatError, RecordField, Result};

use super::{Record, LENGTH_PREFIX_SIZE};

/// Decodes records from the bytes of a backing file
pub struct RecordDecoder {
    /// Bytes not yet consumed
    buf: Bytes,
    /// File offset of the next unread byte
    offset: u64,
    /// Set after the first error so iteration stops
    failed: bool,
}

impl RecordDecoder {
    /// Create a decoder over a complete file image
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self {
            buf: image.into(),
            offset: 0,
            failed: false,
        }
    }

    /// Decode the next record
    ///
    /// Returns:
    /// - `Ok(Some(record))` — a complete record
    /// - `Ok(None)` — end of data at a record boundary
    /// - `Err(CorruptData)` — data ended inside a record
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if !self.buf.has_remaining() {
            return Ok(None);
        }

        let key_len = self.read_len(RecordField::KeyLength)?;
        let key = self.read_bytes(key_len, RecordField::Key)?;
        let value_len = self.read_len(RecordField::ValueLength)?;
        let value = self.read_bytes(value_len, RecordField::Value)?;

        Ok(Some(Record { key, value }))
    }

    /// Byte offset of the next unread record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes left to decode
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn read_len(&mut self, field: RecordField) -> Result<usize> {
        self.ensure(LENGTH_PREFIX_SIZE, field)?;
        self.offset += LENGTH_PREFIX_SIZE as u64;
        Ok(self.buf.get_u32() as usize)
    }

    fn read_bytes(&mut self, len: usize, field: RecordField) -> Result<Bytes> {
        self.ensure(len, field)?;
        self.offset += len as u64;
        Ok(self.buf.split_to(len))
    }

    fn ensure(&self, needed: usize, field: RecordField) -> Result<()> {
        let available = self.buf.remaining();
        if available < needed {
            return Err(FlatError::CorruptData {
                offset: self.offset,
                field,
                needed: needed as u64,
                available: available as u64,
            });
        }
        Ok(())
    }
}

impl Iterator for RecordDecoder {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
