use crate::scan::{count_lines, Scanner};
use crate::{Error, Index, KeyLength, Record, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

pub struct IndexBuilder {
    key_length: KeyLength,
    preallocate: bool,
}

impl IndexBuilder {
    pub fn new(key_length: KeyLength) -> Self {
        Self {
            key_length,
            preallocate: true,
        }
    }

    /// Whether to count lines in a separate pass before building, so that
    /// the record buffer is allocated once. Enabled by default.
    pub fn preallocate(self, preallocate: bool) -> Self {
        Self {
            preallocate,
            ..self
        }
    }

    pub fn build_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Index> {
        let path = path.as_ref();

        let capacity = if self.preallocate {
            match File::open(path).and_then(|f| count_lines(BufReader::new(f))) {
                Ok(n) => n,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "line counting pass failed");
                    0
                }
            }
        } else {
            0
        };

        let scanner = Scanner::open(path)?;
        let records = self
            .collect_records(scanner, capacity)
            .map_err(|e| Error::read(path, e))?;

        debug!(path = %path.display(), records = records.len(), "built index");
        Ok(Index::from_parts(self.key_length, records))
    }

    /// Builds from an in-memory or already opened stream. No counting pass
    /// is made since the stream can only be read once.
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> io::Result<Index> {
        let records = self.collect_records(Scanner::new(reader), 0)?;
        Ok(Index::from_parts(self.key_length, records))
    }

    fn collect_records<R: BufRead>(
        &self,
        scanner: Scanner<R>,
        capacity: usize,
    ) -> io::Result<Vec<Record>> {
        let mut records = Vec::with_capacity(capacity);
        for line in scanner {
            let (offset, line) = line?;
            records.push(Record::new(self.key_length.extract(&line), offset));
        }

        // stable, so equal keys stay in scan order
        records.sort_by(Record::cmp_key);
        Ok(records)
    }
}
