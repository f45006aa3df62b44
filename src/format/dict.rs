//! Length-prefixed dictionary codec
//!
//! Several chunk kinds (MATL, nTRN, nGRP, nSHP) embed a small key/value
//! dictionary: an int32 pair count, then per pair a length-prefixed key
//! string and a length-prefixed value string, both UTF-8. Entry order
//! carries meaning for material decoding, so [`VoxDict`] preserves it and
//! keeps duplicate keys instead of collapsing them into a map.

use crate::error::{ParseError, VoxResult};
use crate::format::cursor::ChunkCursor;

/// Ordered key/value pairs exactly as they appear in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxDict {
    pub entries: Vec<(String, String)>,
}

impl VoxDict {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in stream order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of the first entry with the given key, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Decodes one dictionary from the front of `cursor`.
pub fn read_dict(cursor: &mut ChunkCursor<'_>) -> VoxResult<VoxDict> {
    let count = cursor.read_len("dictionary pair count")?;
    // A pair needs at least 8 bytes of length prefixes, which bounds how
    // much of the claimed count can be real before truncation fires.
    let mut entries = Vec::with_capacity(count.min(cursor.remaining() / 8));
    for _ in 0..count {
        let key = read_string(cursor, "dictionary key")?;
        let value = read_string(cursor, "dictionary value")?;
        entries.push((key, value));
    }
    Ok(VoxDict { entries })
}

fn read_string(cursor: &mut ChunkCursor<'_>, field: &'static str) -> VoxResult<String> {
    let len = cursor.read_len(field)?;
    let bytes = cursor.read_bytes(len)?;
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Ok(text),
        Err(_) => Err(ParseError::InvalidString {
            chunk: cursor.label().to_string(),
            field,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxError;

    fn encode_dict(pairs: &[(&str, &str)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(pairs.len() as i32).to_le_bytes());
        for (key, value) in pairs {
            bytes.extend_from_slice(&(key.len() as i32).to_le_bytes());
            bytes.extend_from_slice(key.as_bytes());
            bytes.extend_from_slice(&(value.len() as i32).to_le_bytes());
            bytes.extend_from_slice(value.as_bytes());
        }
        bytes
    }

    #[test]
    fn test_read_dict_preserves_order_and_duplicates() {
        let bytes = encode_dict(&[("_type", "_emit"), ("_emit", "0.5"), ("_type", "_glass")]);
        let mut cursor = ChunkCursor::new(&bytes, "MATL");
        let dict = read_dict(&mut cursor).expect("Failed to read dict");

        assert_eq!(dict.len(), 3);
        let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["_type", "_emit", "_type"]);
        assert_eq!(dict.first("_type"), Some("_emit"));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_empty_dict() {
        let bytes = encode_dict(&[]);
        let mut cursor = ChunkCursor::new(&bytes, "nGRP");
        let dict = read_dict(&mut cursor).expect("Failed to read dict");
        assert!(dict.is_empty());
    }

    #[test]
    fn test_truncated_value_fails() {
        let mut bytes = encode_dict(&[("_t", "1 2 3")]);
        bytes.truncate(bytes.len() - 2);
        let mut cursor = ChunkCursor::new(&bytes, "nTRN");
        assert!(matches!(
            read_dict(&mut cursor),
            Err(VoxError::Parse(ParseError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_invalid_utf8_key_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(&0i32.to_le_bytes());

        let mut cursor = ChunkCursor::new(&bytes, "MATL");
        match read_dict(&mut cursor) {
            Err(VoxError::Parse(ParseError::InvalidString { chunk, field })) => {
                assert_eq!(chunk, "MATL");
                assert_eq!(field, "dictionary key");
            }
            other => panic!("Expected invalid string error, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_claimed_count_errors_without_allocating() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&i32::MAX.to_le_bytes());
        let mut cursor = ChunkCursor::new(&bytes, "MATL");
        assert!(matches!(
            read_dict(&mut cursor),
            Err(VoxError::Parse(ParseError::Truncated { .. }))
        ));
    }
}
