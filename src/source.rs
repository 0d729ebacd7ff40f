//! Sequential byte producers consumed by [`RowReader`](crate::RowReader).

use std::io::{self, BufRead, BufReader, ErrorKind, Read};

/// A sequential producer of bytes.
///
/// The reader only ever looks one byte ahead: `peek` inspects the next byte without moving
/// past it, `get` consumes it. Both return `None` once the stream is exhausted.
pub trait DataSource {
    /// Returns the next byte without consuming it.
    fn peek(&mut self) -> io::Result<Option<u8>>;

    /// Consumes and returns the next byte.
    fn get(&mut self) -> io::Result<Option<u8>>;

    /// Returns `true` if no more bytes are available.
    fn end(&mut self) -> io::Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Consumes up to `count` bytes, appending them to `buf`. Returns the number of bytes
    /// appended, which is less than `count` only at end of stream.
    fn read(&mut self, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
        let mut n_read = 0;
        while n_read < count {
            match self.get()? {
                Some(byte) => {
                    buf.push(byte);
                    n_read += 1;
                }
                None => break,
            }
        }
        Ok(n_read)
    }
}

impl<S: DataSource + ?Sized> DataSource for &mut S {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        (**self).peek()
    }
    fn get(&mut self) -> io::Result<Option<u8>> {
        (**self).get()
    }
    fn end(&mut self) -> io::Result<bool> {
        (**self).end()
    }
    fn read(&mut self, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
        (**self).read(buf, count)
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        (**self).peek()
    }
    fn get(&mut self) -> io::Result<Option<u8>> {
        (**self).get()
    }
    fn end(&mut self) -> io::Result<bool> {
        (**self).end()
    }
    fn read(&mut self, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
        (**self).read(buf, count)
    }
}

/// An in-memory source over an owned byte buffer.
#[derive(Debug, Clone, Default)]
pub struct StringDataSource {
    data: Vec<u8>,
    pos: usize,
}

impl StringDataSource {
    pub fn new<B: Into<Vec<u8>>>(data: B) -> StringDataSource {
        StringDataSource { data: data.into(), pos: 0 }
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }
}

impl From<&str> for StringDataSource {
    fn from(data: &str) -> StringDataSource {
        StringDataSource::new(data)
    }
}
impl From<String> for StringDataSource {
    fn from(data: String) -> StringDataSource {
        StringDataSource::new(data)
    }
}

impl DataSource for StringDataSource {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.data.get(self.pos).copied())
    }

    fn get(&mut self) -> io::Result<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn end(&mut self) -> io::Result<bool> {
        Ok(self.pos >= self.data.len())
    }

    fn read(&mut self, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
        let remaining = self.remaining();
        let n_read = count.min(remaining.len());
        buf.extend_from_slice(&remaining[..n_read]);
        self.pos += n_read;
        Ok(n_read)
    }
}

/// A source pulling bytes from any `std::io::Read` through a `BufReader`.
///
/// The first `Ok(0)` from the inner reader ends the source for good; the inner reader is not
/// read again afterward, even if it would produce more bytes (e.g. a terminal after Ctrl-D).
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    eof: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> ReaderSource<R> {
        ReaderSource { reader: BufReader::new(reader), eof: false }
    }

    pub fn with_capacity(capacity: usize, reader: R) -> ReaderSource<R> {
        ReaderSource { reader: BufReader::with_capacity(capacity, reader), eof: false }
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.eof {
            return Ok(&[]);
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    if buf.is_empty() {
                        self.eof = true;
                    }
                    break;
                }
                Err(ref err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(self.reader.buffer())
    }
}

impl<R: Read> DataSource for ReaderSource<R> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.fill_buf()?.first().copied())
    }

    fn get(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn read(&mut self, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
        let mut n_read = 0;
        while n_read < count {
            let available = self.fill_buf()?;
            if available.is_empty() {
                break;
            }
            let n = available.len().min(count - n_read);
            buf.extend_from_slice(&available[..n]);
            self.reader.consume(n);
            n_read += n;
        }
        Ok(n_read)
    }
}
