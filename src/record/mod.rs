//! Record Module
//!
//! The flat on-disk format shared by persist and load.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Record 1                                                │
//! │ ┌────────────┬───────────┬──────────────┬─────────────┐ │
//! │ │KeyLen (4)  │ Key       │ ValueLen (4) │ Value       │ │
//! │ └────────────┴───────────┴──────────────┴─────────────┘ │
//! ├─────────────────────────────────────────────────────────┤
//! │ Record 2 ...                                            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are unsigned 32-bit big-endian. There is no header, no footer,
//! no checksum and no entry count: end of records is end of file, and an
//! empty file is an empty store.

mod decoder;
mod encoder;

use bytes::Bytes;

use crate::error::{FlatError, RecordField, Result};

pub use decoder::RecordDecoder;
pub use encoder::RecordEncoder;

/// Size of each key/value length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// A single decoded key/value record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Bytes,
    pub value: Bytes,
}

/// Number of bytes a record occupies on disk
pub fn encoded_len(key: &[u8], value: &[u8]) -> usize {
    2 * LENGTH_PREFIX_SIZE + key.len() + value.len()
}

/// Reject entries whose lengths cannot be written as a u32 prefix
pub fn check_entry(key: &[u8], value: &[u8]) -> Result<()> {
    check_len(RecordField::Key, key.len())?;
    check_len(RecordField::Value, value.len())
}

fn check_len(field: RecordField, len: usize) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(FlatError::EntryTooLarge { field, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_check_len_rejects_past_u32() {
        let len = u32::MAX as usize + 1;

        match check_len(RecordField::Key, len) {
            Err(FlatError::EntryTooLarge { field, len: rejected }) => {
                assert_eq!(field, RecordField::Key);
                assert_eq!(rejected, len);
            }
            other => panic!("expected EntryTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_check_len_accepts_u32_max() {
        assert!(check_len(RecordField::Value, u32::MAX as usize).is_ok());
    }
}
