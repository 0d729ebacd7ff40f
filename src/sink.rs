//! Sequential byte consumers fed by [`RowWriter`](crate::RowWriter).

use std::borrow::Cow;
use std::io::{self, Write};

/// A sequential consumer of bytes.
pub trait DataSink {
    /// Appends one byte.
    fn put(&mut self, byte: u8) -> io::Result<()>;

    /// Appends all of `bytes`. On failure, some prefix of `bytes` may already be written.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &byte in bytes {
            self.put(byte)?;
        }
        Ok(())
    }

    /// Pushes any buffered bytes to their final destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: DataSink + ?Sized> DataSink for &mut S {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        (**self).put(byte)
    }
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S: DataSink + ?Sized> DataSink for Box<S> {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        (**self).put(byte)
    }
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// An in-memory sink collecting everything written to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringDataSink {
    data: Vec<u8>,
}

impl StringDataSink {
    pub fn new() -> StringDataSink {
        StringDataSink::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Consumes the sink, returning its contents as a `String`. Returns the raw bytes back if
    /// they are not valid UTF-8.
    pub fn into_string(self) -> ::std::result::Result<String, Vec<u8>> {
        String::from_utf8(self.data).map_err(|err| err.into_bytes())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl DataSink for StringDataSink {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.data.push(byte);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.data.extend_from_slice(bytes);
        Ok(())
    }
}

/// A sink forwarding bytes to any `std::io::Write`.
///
/// No buffering is added; wrap the writer in a `BufWriter` when it is a file or socket.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> WriterSink<W> {
        WriterSink { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataSink for WriterSink<W> {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
