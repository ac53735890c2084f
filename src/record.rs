use std::cmp::Ordering;

/// A line of the indexed file: its key prefix and the byte offset where the
/// line begins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    key: Vec<u8>,
    offset: u64,
}

impl Record {
    pub fn new<K: Into<Vec<u8>>>(key: K, offset: u64) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Byte-wise comparison of keys. Offsets are not considered.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
