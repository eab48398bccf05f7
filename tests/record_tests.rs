//! Tests for the record codec
//!
//! These tests verify:
//! - Encoded byte layout (big-endian length prefixes, no framing)
//! - Decoding stops cleanly only at a record boundary
//! - Each truncation point reports the matching field and offset

use bytes::Bytes;
use flatkv::record::{self, Record, RecordDecoder, RecordEncoder, LENGTH_PREFIX_SIZE};
use flatkv::{FlatError, RecordField};

// =============================================================================
// Helper Functions
// =============================================================================

fn encode(entries: &[(&[u8], &[u8])]) -> Bytes {
    let mut encoder = RecordEncoder::new();
    for (key, value) in entries {
        encoder.encode(key, value).unwrap();
    }
    encoder.finish()
}

fn expect_corrupt(image: Vec<u8>) -> (u64, RecordField, u64, u64) {
    let mut decoder = RecordDecoder::new(image);
    loop {
        match decoder.next_record() {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("expected CorruptData, got clean end"),
            Err(FlatError::CorruptData {
                offset,
                field,
                needed,
                available,
            }) => return (offset, field, needed, available),
            Err(other) => panic!("expected CorruptData, got {:?}", other),
        }
    }
}

// =============================================================================
// Encoder Tests
// =============================================================================

#[test]
fn test_encoder_empty() {
    let encoder = RecordEncoder::new();

    assert!(encoder.is_empty());
    assert_eq!(encoder.record_count(), 0);
    assert!(encoder.finish().is_empty());
}

#[test]
fn test_encoder_layout() {
    let image = encode(&[(b"ab", b"xyz")]);

    assert_eq!(
        image.as_ref(),
        &[0, 0, 0, 2, b'a', b'b', 0, 0, 0, 3, b'x', b'y', b'z']
    );
}

#[test]
fn test_encoder_lengths_are_big_endian() {
    let value = vec![7u8; 0x0102];
    let image = encode(&[(b"k", &value)]);

    assert_eq!(&image[5..9], &[0x00u8, 0x00, 0x01, 0x02]);
}

#[test]
fn test_encoder_tracks_len_and_count() {
    let mut encoder = RecordEncoder::with_capacity(64);
    encoder.encode(b"one", b"1").unwrap();
    encoder.encode(b"two", b"22").unwrap();

    assert_eq!(encoder.record_count(), 2);
    assert_eq!(
        encoder.len(),
        record::encoded_len(b"one", b"1") + record::encoded_len(b"two", b"22")
    );
}

#[test]
fn test_encoded_len() {
    assert_eq!(record::encoded_len(b"", b""), 2 * LENGTH_PREFIX_SIZE);
    assert_eq!(record::encoded_len(b"key", b"value"), 8 + 3 + 5);
}

#[test]
fn test_check_entry_accepts_normal_sizes() {
    assert!(record::check_entry(b"key", b"value").is_ok());
    assert!(record::check_entry(b"", b"").is_ok());
}

// =============================================================================
// Decoder Tests
// =============================================================================

#[test]
fn test_decoder_empty_image() {
    let mut decoder = RecordDecoder::new(Vec::<u8>::new());

    assert!(decoder.next_record().unwrap().is_none());
    assert_eq!(decoder.offset(), 0);
}

#[test]
fn test_decoder_reads_records_in_order() {
    let image = encode(&[(b"a", b"1"), (b"bb", b""), (b"", b"333")]);

    let records: Vec<Record> = RecordDecoder::new(image)
        .collect::<flatkv::Result<_>>()
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].key.as_ref(), b"a");
    assert_eq!(records[0].value.as_ref(), b"1");
    assert_eq!(records[1].key.as_ref(), b"bb");
    assert!(records[1].value.is_empty());
    assert!(records[2].key.is_empty());
    assert_eq!(records[2].value.as_ref(), b"333");
}

#[test]
fn test_decoder_offset_advances_per_record() {
    let image = encode(&[(b"key", b"value"), (b"k2", b"v2")]);
    let total = image.len();
    let mut decoder = RecordDecoder::new(image);

    decoder.next_record().unwrap().unwrap();
    assert_eq!(decoder.offset(), 16);

    decoder.next_record().unwrap().unwrap();
    assert_eq!(decoder.offset() as usize, total);
    assert_eq!(decoder.remaining(), 0);
    assert!(decoder.next_record().unwrap().is_none());
}

#[test]
fn test_decoder_non_utf8_bytes() {
    let key = [0xc3u8, 0x28];
    let value = [0u8, 0xff, 0x00, 0xfe];
    let image = encode(&[(&key, &value)]);

    let record = RecordDecoder::new(image).next().unwrap().unwrap();
    assert_eq!(record.key.as_ref(), &key);
    assert_eq!(record.value.as_ref(), &value);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_truncated_key_length() {
    for cut in 1..LENGTH_PREFIX_SIZE {
        let image = vec![0u8; cut];
        let (offset, field, needed, available) = expect_corrupt(image);

        assert_eq!(offset, 0);
        assert_eq!(field, RecordField::KeyLength);
        assert_eq!(needed, 4);
        assert_eq!(available, cut as u64);
    }
}

#[test]
fn test_truncated_key() {
    let mut image = Vec::new();
    image.extend_from_slice(&10u32.to_be_bytes());
    image.extend_from_slice(b"abc");

    assert_eq!(expect_corrupt(image), (4, RecordField::Key, 10, 3));
}

#[test]
fn test_truncated_value_length() {
    let mut image = encode(&[(b"key", b"value")]).to_vec();
    image.truncate(4 + 3 + 2);

    assert_eq!(expect_corrupt(image), (7, RecordField::ValueLength, 4, 2));
}

#[test]
fn test_truncated_value() {
    let mut image = encode(&[(b"key", b"value")]).to_vec();
    image.pop();

    assert_eq!(expect_corrupt(image), (11, RecordField::Value, 5, 4));
}

#[test]
fn test_truncated_second_record_reports_its_offset() {
    let mut image = encode(&[(b"a", b"1"), (b"b", b"2")]).to_vec();
    image.truncate(10 + 2);

    assert_eq!(expect_corrupt(image), (10, RecordField::KeyLength, 4, 2));
}

#[test]
fn test_iterator_stops_after_error() {
    let mut image = encode(&[(b"a", b"1")]).to_vec();
    image.push(0);
    let mut decoder = RecordDecoder::new(image);

    assert!(decoder.next().unwrap().is_ok());
    assert!(matches!(
        decoder.next(),
        Some(Err(FlatError::CorruptData { .. }))
    ));
    assert!(decoder.next().is_none());
}

#[test]
fn test_corrupt_error_message() {
    let err = expect_corrupt(vec![0, 0]);
    let message = FlatError::CorruptData {
        offset: err.0,
        field: err.1,
        needed: err.2,
        available: err.3,
    }
    .to_string();

    assert_eq!(
        message,
        "corrupt data at offset 0: truncated key length (needed 4 bytes, 2 available)"
    );
}
