use crate::scan::strip_newline;
use crate::{Error, KeyLength, Record, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An original line reassembled through the index: the stored key and
/// whatever followed the key prefix in the input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    key: Vec<u8>,
    payload: Vec<u8>,
}

impl Listing {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Writes `key`, `payload` and a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.key)?;
        writer.write_all(&self.payload)?;
        writer.write_all(b"\n")
    }
}

/// Reads lines of the original input back by offset.
pub struct Lookup<R> {
    reader: BufReader<R>,
    path: PathBuf,
    key_length: KeyLength,
    line: Vec<u8>,
}

impl Lookup<File> {
    pub fn open<P: AsRef<Path>>(path: P, key_length: KeyLength) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        Ok(Self::new(file, path, key_length))
    }
}

impl<R: io::Read + Seek> Lookup<R> {
    /// `path` only labels errors.
    pub fn new<P: Into<PathBuf>>(inner: R, path: P, key_length: KeyLength) -> Self {
        Self {
            reader: BufReader::new(inner),
            path: path.into(),
            key_length,
            line: Vec::new(),
        }
    }

    pub fn fetch(&mut self, record: &Record) -> Result<Listing> {
        let offset = record.offset();
        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|source| Error::Seek {
                path: self.path.clone(),
                offset,
                source,
            })?;

        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(|e| Error::read(&self.path, e))?;
        if n == 0 {
            return Err(Error::Seek {
                path: self.path.clone(),
                offset,
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "offset is at or beyond the end of the file",
                ),
            });
        }

        let line = strip_newline(&self.line);
        if self.key_length.extract(line) != record.key() {
            debug!(
                path = %self.path.display(),
                offset,
                "line prefix differs from indexed key, input may have changed"
            );
        }

        Ok(Listing {
            key: record.key().to_vec(),
            payload: self.key_length.payload(line).to_vec(),
        })
    }

    /// Fetches every record in order. A failed record yields its error and
    /// the following records are still attempted.
    pub fn listings<'a>(
        &'a mut self,
        records: &'a [Record],
    ) -> impl Iterator<Item = Result<Listing>> + 'a {
        records.iter().map(move |record| self.fetch(record))
    }
}

#[cfg(test)]
mod tests {
    use super::Lookup;
    use crate::{Error, IndexBuilder, KeyLength, Record};
    use std::io::Cursor;

    const TEXT: &[u8] = b"banana\napple\ncherry";

    fn lookup(key_length: usize) -> Lookup<Cursor<&'static [u8]>> {
        Lookup::new(Cursor::new(TEXT), "text", KeyLength::new(key_length).unwrap())
    }

    #[test]
    fn lists_in_index_order() {
        let key_length = KeyLength::new(1).unwrap();
        let index = IndexBuilder::new(key_length)
            .build_from_reader(Cursor::new(TEXT))
            .unwrap();

        let mut lookup = lookup(1);
        let listed: Vec<(Vec<u8>, Vec<u8>)> = lookup
            .listings(index.records())
            .map(|l| l.map(|l| (l.key().to_vec(), l.payload().to_vec())))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            listed,
            vec![
                (b"a".to_vec(), b"pple".to_vec()),
                (b"b".to_vec(), b"anana".to_vec()),
                (b"c".to_vec(), b"herry".to_vec()),
            ]
        );
    }

    #[test]
    fn short_line_has_empty_payload() {
        let listing = lookup(10).fetch(&Record::new("apple", 7)).unwrap();
        assert_eq!(listing.key(), b"apple");
        assert_eq!(listing.payload(), b"");

        let mut out = Vec::new();
        listing.write_to(&mut out).unwrap();
        assert_eq!(out, b"apple\n");
    }

    #[test]
    fn stored_key_wins() {
        let listing = lookup(2).fetch(&Record::new("zz", 0)).unwrap();
        assert_eq!(listing.key(), b"zz");
        assert_eq!(listing.payload(), b"nana");
    }

    #[test]
    fn bad_offset_does_not_stop_listing() {
        let records = vec![
            Record::new("c", 13),
            Record::new("x", 1000),
            Record::new("x", TEXT.len() as u64),
            Record::new("a", 7),
        ];
        let mut lookup = lookup(1);
        let results: Vec<_> = lookup.listings(&records).collect();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().payload(), b"herry");
        assert!(matches!(results[1], Err(Error::Seek { offset: 1000, .. })));
        assert!(matches!(results[2], Err(Error::Seek { .. })));
        assert_eq!(results[3].as_ref().unwrap().payload(), b"pple");
    }
}
