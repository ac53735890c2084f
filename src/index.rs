use crate::codec::{self, OffsetOrder};
use crate::lookup::{Listing, Lookup};
use crate::{KeyLength, Record, Result};
use std::io::{self, Write};
use std::path::Path;

/// Records of one input file, sorted by key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    key_length: KeyLength,
    records: Vec<Record>,
}

impl Index {
    /// `records` are expected to be sorted by key already.
    pub fn from_parts(key_length: KeyLength, records: Vec<Record>) -> Index {
        Index {
            key_length,
            records,
        }
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P, key_length: KeyLength) -> Result<Index> {
        let records = codec::read_index(path, key_length)?;
        Ok(Index::from_parts(key_length, records))
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        codec::write_index(path, &self.records, self.key_length)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        codec::encode::<OffsetOrder, _>(&self.records, self.key_length, writer)
    }

    /// Reopens the indexed file and reads its lines back in key order.
    pub fn lookup<P: AsRef<Path>>(&self, input: P) -> Result<Vec<Result<Listing>>> {
        let mut lookup = Lookup::open(input, self.key_length)?;
        Ok(lookup.listings(&self.records).collect())
    }

    pub fn key_length(&self) -> KeyLength {
        self.key_length
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
