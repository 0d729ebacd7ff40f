use log::trace;
use memchr::{memchr3, memchr_iter};

use crate::dialect::{normalize_delimiter, QUOTE, TERMINATOR};
use crate::error::*;
use crate::sink::DataSink;

/// Writes DSV rows to a [`DataSink`], one row per call.
///
/// Fields are quoted only when they contain the delimiter, a quote, or a newline, unless the
/// writer was built to quote everything. The writer keeps no buffer of its own; every byte
/// goes straight to the sink.
#[derive(Debug)]
pub struct RowWriter<S> {
    sink: S,
    delimiter: u8,
    quote_all: bool,
    n_rows: u64,
}

impl<S: DataSink> RowWriter<S> {
    /// Creates a writer over `sink`. A `"` delimiter is replaced by `,`.
    pub fn new(sink: S, delimiter: u8, quote_all: bool) -> RowWriter<S> {
        RowWriter {
            sink,
            delimiter: normalize_delimiter(delimiter),
            quote_all,
            n_rows: 0,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn is_quote_all(&self) -> bool {
        self.quote_all
    }

    /// Number of rows written so far.
    pub fn row_count(&self) -> u64 {
        self.n_rows
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Writes one row followed by a newline. A row without fields is written as a bare
    /// newline.
    ///
    /// If the sink fails partway through, the bytes already written for this row stay in the
    /// sink.
    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut n_fields = 0;
        for field in fields {
            if n_fields > 0 {
                self.sink.put(self.delimiter)?;
            }
            self.write_field(field.as_ref())?;
            n_fields += 1;
        }
        self.sink.put(TERMINATOR)?;
        trace!("wrote row {} with {} fields", self.n_rows, n_fields);
        self.n_rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn needs_quotes(&self, field: &[u8]) -> bool {
        self.quote_all || memchr3(self.delimiter, QUOTE, TERMINATOR, field).is_some()
    }

    fn write_field(&mut self, field: &[u8]) -> Result<()> {
        if !self.needs_quotes(field) {
            self.sink.write(field)?;
            return Ok(());
        }
        self.sink.put(QUOTE)?;
        let mut start = 0;
        for pos in memchr_iter(QUOTE, field) {
            // up to and including the quote, then the quote again
            self.sink.write(&field[start..=pos])?;
            self.sink.put(QUOTE)?;
            start = pos + 1;
        }
        self.sink.write(&field[start..])?;
        self.sink.put(QUOTE)?;
        Ok(())
    }
}
