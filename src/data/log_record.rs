use bytes::{Buf, BufMut, BytesMut};
use time::OffsetDateTime;

use crate::errors::{Errors, Result};

/// checksum(4) + timestamp(8) + key size(4) + value size(4)
pub const LOG_RECORD_HEADER_SIZE: usize = 20;

/// A single key/value write as it is laid out in a segment.
///
/// ```text
/// +----------+-----------+----------+------------+-----+-------+
/// | checksum | timestamp | key size | value size | key | value |
/// |  i32 le  |  i64 le   |  i32 le  |   i32 le   |     |       |
/// +----------+-----------+----------+------------+-----+-------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
  pub key: String,
  pub value: String,
  /// Unix seconds at write time.
  pub timestamp: i64,
}

/// A decoded record plus the on-disk facts about it.
#[derive(Debug)]
pub struct ReadLogRecord {
  pub record: LogRecord,
  pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecordHeader {
  pub checksum: i32,
  pub timestamp: i64,
  pub key_size: usize,
  pub value_size: usize,
}

impl LogRecordHeader {
  pub fn body_size(&self) -> usize {
    self.key_size + self.value_size
  }
}

impl LogRecord {
  pub fn new(key: &str, value: &str) -> Self {
    Self {
      key: key.to_owned(),
      value: value.to_owned(),
      timestamp: OffsetDateTime::now_utc().unix_timestamp(),
    }
  }

  pub fn encode(&self) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(self.encoded_len());
    buf.put_i32_le(checksum(&self.key, &self.value));
    buf.put_i64_le(self.timestamp);
    buf.put_i32_le(self.key.len() as i32);
    buf.put_i32_le(self.value.len() as i32);
    buf.extend_from_slice(self.key.as_bytes());
    buf.extend_from_slice(self.value.as_bytes());
    buf.to_vec()
  }

  pub fn encoded_len(&self) -> usize {
    LOG_RECORD_HEADER_SIZE + self.key.len() + self.value.len()
  }
}

/// Additive checksum over the code points of `key` followed by `value`,
/// wrapping at 32 bits. Existing segments depend on this exact sum.
pub fn checksum(key: &str, value: &str) -> i32 {
  key
    .chars()
    .chain(value.chars())
    .fold(0i32, |sum, c| sum.wrapping_add(c as i32))
}

pub fn decode_log_record_header(mut buf: &[u8]) -> Result<LogRecordHeader> {
  if buf.len() < LOG_RECORD_HEADER_SIZE {
    return Err(Errors::MalformedRecord);
  }

  let checksum = buf.get_i32_le();
  let timestamp = buf.get_i64_le();
  let key_size = buf.get_i32_le();
  let value_size = buf.get_i32_le();
  if key_size < 0 || value_size < 0 {
    return Err(Errors::MalformedRecord);
  }

  Ok(LogRecordHeader {
    checksum,
    timestamp,
    key_size: key_size as usize,
    value_size: value_size as usize,
  })
}

/// Builds the record from its header and body bytes, validating the checksum.
pub fn decode_log_record_body(header: &LogRecordHeader, body: &[u8]) -> Result<ReadLogRecord> {
  if body.len() < header.body_size() {
    return Err(Errors::MalformedRecord);
  }

  let (key, rest) = body.split_at(header.key_size);
  let value = &rest[..header.value_size];
  let key = std::str::from_utf8(key).map_err(|_| Errors::MalformedRecord)?;
  let value = std::str::from_utf8(value).map_err(|_| Errors::MalformedRecord)?;

  if checksum(key, value) != header.checksum {
    return Err(Errors::InvalidLogRecordChecksum);
  }

  Ok(ReadLogRecord {
    record: LogRecord {
      key: key.to_owned(),
      value: value.to_owned(),
      timestamp: header.timestamp,
    },
    size: LOG_RECORD_HEADER_SIZE + header.body_size(),
  })
}

/// Decodes one record from the front of `buf`.
pub fn decode_log_record(buf: &[u8]) -> Result<ReadLogRecord> {
  let header = decode_log_record_header(buf)?;
  decode_log_record_body(&header, &buf[LOG_RECORD_HEADER_SIZE..])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(key: &str, value: &str) -> LogRecord {
    LogRecord {
      key: key.to_string(),
      value: value.to_string(),
      timestamp: 1_700_000_000,
    }
  }

  #[test]
  fn test_log_record_encode_layout() {
    let enc = record("key-0", "value-0").encode();
    assert_eq!(enc.len(), LOG_RECORD_HEADER_SIZE + 5 + 7);

    let sum: i32 = "key-0value-0".bytes().map(|b| b as i32).sum();
    assert_eq!(&enc[0..4], &sum.to_le_bytes());
    assert_eq!(&enc[4..12], &1_700_000_000i64.to_le_bytes());
    assert_eq!(&enc[12..16], &5i32.to_le_bytes());
    assert_eq!(&enc[16..20], &7i32.to_le_bytes());
    assert_eq!(&enc[20..25], b"key-0");
    assert_eq!(&enc[25..], b"value-0");
  }

  #[test]
  fn test_log_record_decode() {
    let rec = record("name", "bitcask-rs");
    let res = decode_log_record(&rec.encode()).unwrap();
    assert_eq!(res.record, rec);
    assert_eq!(res.size, rec.encoded_len());

    // empty value
    let rec2 = record("name", "");
    let res2 = decode_log_record(&rec2.encode()).unwrap();
    assert_eq!(res2.record, rec2);
    assert_eq!(res2.size, LOG_RECORD_HEADER_SIZE + 4);
  }

  #[test]
  fn test_log_record_decode_multibyte() {
    let rec = record("ключ", "значение-ü");
    let res = decode_log_record(&rec.encode()).unwrap();
    assert_eq!(res.record, rec);
  }

  #[test]
  fn test_log_record_corrupted_body() {
    let rec = record("key-1", "value-1");
    let enc = rec.encode();

    for i in LOG_RECORD_HEADER_SIZE..enc.len() {
      let mut damaged = enc.clone();
      damaged[i] ^= 0x01;
      let res = decode_log_record(&damaged);
      assert_eq!(res.err().unwrap(), Errors::InvalidLogRecordChecksum);

      // high bit flips also break the utf-8 body
      let mut damaged = enc.clone();
      damaged[i] ^= 0x80;
      assert!(decode_log_record(&damaged).is_err());
    }
  }

  #[test]
  fn test_log_record_truncated() {
    let enc = record("key-2", "value-2").encode();
    assert_eq!(
      decode_log_record(&enc[..LOG_RECORD_HEADER_SIZE - 1]).err().unwrap(),
      Errors::MalformedRecord
    );
    assert_eq!(
      decode_log_record(&enc[..enc.len() - 1]).err().unwrap(),
      Errors::MalformedRecord
    );
  }

  #[test]
  fn test_log_record_negative_size() {
    let mut enc = record("key-3", "value-3").encode();
    enc[12..16].copy_from_slice(&(-1i32).to_le_bytes());
    assert_eq!(decode_log_record(&enc).err().unwrap(), Errors::MalformedRecord);
  }

  #[test]
  fn test_checksum_wraps() {
    assert_eq!(checksum("", ""), 0);
    assert_eq!(checksum("a", "b"), 97 + 98);
    assert_eq!(checksum("€", ""), 0x20AC);

    let long = "\u{10FFFF}".repeat(3000);
    let expected = (0x10FFFFi64 * 3000) as i32;
    assert_eq!(checksum(&long, ""), expected);
  }
}
