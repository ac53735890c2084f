//! Fixed-width binary layout of index files.
//!
//! ```text
//! entry := key (key_length bytes, zero padded) || offset (u64)
//! file  := entry*
//! ```
//!
//! Files written by this crate store offsets as [`OffsetOrder`]. Keys shorter
//! than the key length only occur for lines shorter than the key length and are
//! padded with [`PAD_BYTE`]; trailing pad bytes are dropped again on decode.

use crate::{Error, KeyLength, Record, Result};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

pub type OffsetOrder = LittleEndian;

/// Fills the key field of lines shorter than the key length.
///
/// Decoding drops every trailing `PAD_BYTE`, so a key whose last real bytes
/// are NUL comes back shorter, and a listing prints that line without those
/// NUL bytes in its key part.
pub const PAD_BYTE: u8 = 0;
pub const OFFSET_SIZE: usize = std::mem::size_of::<u64>();

pub fn entry_size(key_length: KeyLength) -> usize {
    key_length.get() + OFFSET_SIZE
}

pub fn encode<O, W>(records: &[Record], key_length: KeyLength, mut writer: W) -> io::Result<()>
where
    O: ByteOrder,
    W: Write,
{
    let mut field = vec![PAD_BYTE; key_length.get()];
    for record in records {
        let key = record.key();
        if key.len() > field.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("key of {} bytes exceeds key length {}", key.len(), key_length),
            ));
        }

        field[..key.len()].copy_from_slice(key);
        for b in &mut field[key.len()..] {
            *b = PAD_BYTE;
        }
        writer.write_all(&field)?;
        writer.write_u64::<O>(record.offset())?;
    }
    Ok(())
}

pub fn decode<O, R>(mut reader: R, key_length: KeyLength, count: usize) -> io::Result<Vec<Record>>
where
    O: ByteOrder,
    R: Read,
{
    let mut records = Vec::with_capacity(count);
    let mut field = vec![0u8; key_length.get()];
    for _ in 0..count {
        reader.read_exact(&mut field)?;
        let offset = reader.read_u64::<O>()?;
        let len = field
            .iter()
            .rposition(|&b| b != PAD_BYTE)
            .map_or(0, |i| i + 1);
        records.push(Record::new(&field[..len], offset));
    }
    Ok(records)
}

/// Writes `records` to `path`, replacing whatever was there.
///
/// A failure part way leaves the partially written file in place.
pub fn write_index<P: AsRef<Path>>(
    path: P,
    records: &[Record],
    key_length: KeyLength,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    let mut writer = BufWriter::new(file);
    encode::<OffsetOrder, _>(records, key_length, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::write(path, e))?;

    debug!(path = %path.display(), entries = records.len(), "wrote index");
    Ok(())
}

pub fn read_index<P: AsRef<Path>>(path: P, key_length: KeyLength) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::read(path, e))?;
    let len = file.metadata().map_err(|e| Error::read(path, e))?.len();

    let entry_size = entry_size(key_length);
    if len % entry_size as u64 != 0 {
        return Err(Error::Format {
            path: path.to_owned(),
            len,
            entry_size,
        });
    }

    let count = (len / entry_size as u64) as usize;
    let records = decode::<OffsetOrder, _>(BufReader::new(file), key_length, count)
        .map_err(|e| Error::read(path, e))?;

    debug!(path = %path.display(), entries = count, "read index");
    Ok(records)
}
