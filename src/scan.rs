use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Iterates over the lines of a byte stream, yielding each line's starting
/// offset together with its content minus the trailing `\n`.
///
/// A final line without a trailing newline is still yielded. Bytes other than
/// `\n` are passed through untouched, including `\r`.
pub struct Scanner<R> {
    reader: R,
    offset: u64,
    buf: Vec<u8>,
}

impl Scanner<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        Ok(Scanner::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = io::Result<(u64, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        let n = match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(n) => n,
            Err(e) => return Some(Err(e)),
        };

        let begin = self.offset;
        self.offset += n as u64;
        Some(Ok((begin, strip_newline(&self.buf).to_vec())))
    }
}

pub(crate) fn strip_newline(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\n') => &line[..line.len() - 1],
        _ => line,
    }
}

/// Counts lines without keeping them. Only used to size buffers up front.
pub fn count_lines<R: BufRead>(mut reader: R) -> io::Result<usize> {
    let mut count = 0;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(count);
        }

        let len = buf.len();
        let newlines = buf.iter().filter(|&&b| b == b'\n').count();
        let ends_with_newline = buf[len - 1] == b'\n';
        count += newlines;
        reader.consume(len);

        if !ends_with_newline && reader.fill_buf()?.is_empty() {
            return Ok(count + 1);
        }
    }
}
