use std::mem;

use log::{debug, trace};

use crate::dialect::{normalize_delimiter, QUOTE, TERMINATOR};
use crate::error::*;
use crate::source::DataSource;

/// A row of UTF-8 fields.
pub type Row = Vec<String>;
/// A row of raw byte fields.
pub type ByteRow = Vec<Vec<u8>>;

// Position of the scanner relative to quoting.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    InField,
    InQuotedField,
    // just consumed a quote inside a quoted span: either an escaped quote or the closing one
    AfterQuoteInField,
}

/// Reads DSV rows from a [`DataSource`], one row per call.
///
/// Decoding is lenient: an unterminated quoted field simply ends at end of input, and quotes
/// in the middle of an unquoted field open a quoted span there. Running out of rows is
/// reported as `Ok(false)`; errors come only from the source itself or from UTF-8 decoding.
#[derive(Debug)]
pub struct RowReader<S> {
    source: S,
    delimiter: u8,
    finished: bool,
    n_rows: u64,
}

impl<S: DataSource> RowReader<S> {
    /// Creates a reader over `source`. A `"` delimiter is replaced by `,`.
    pub fn new(source: S, delimiter: u8) -> RowReader<S> {
        RowReader {
            source,
            delimiter: normalize_delimiter(delimiter),
            finished: false,
            n_rows: 0,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns `true` once the source has been fully consumed. This becomes `true` as soon as
    /// the last row is returned, not on the following (empty) call.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of rows returned so far.
    pub fn row_count(&self) -> u64 {
        self.n_rows
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Reads the next row into `row`, replacing its contents.
    ///
    /// Returns `Ok(false)` if the source was already exhausted. A blank line yields a row
    /// with zero fields.
    pub fn read_byte_row(&mut self, row: &mut ByteRow) -> Result<bool> {
        row.clear();
        if self.source.end()? {
            if !self.finished {
                debug!("end of source after {} rows", self.n_rows);
            }
            self.finished = true;
            return Ok(false);
        }

        let mut field = Vec::new();
        // anything but a bare newline seen in this row: separates a blank line from a row
        // holding a single empty field
        let mut seen_content = false;
        let mut state = ScanState::InField;

        loop {
            match state {
                ScanState::InField => {
                    let byte = match self.source.peek()? {
                        Some(byte) => byte,
                        None => {
                            row.push(field);
                            self.finished = true;
                            debug!("end of source after {} rows", self.n_rows + 1);
                            break;
                        }
                    };
                    self.source.get()?;
                    if byte == TERMINATOR {
                        if self.source.end()? {
                            self.finished = true;
                            debug!("end of source after {} rows", self.n_rows + 1);
                        }
                        if seen_content {
                            row.push(field);
                        }
                        break;
                    } else if byte == QUOTE {
                        seen_content = true;
                        state = ScanState::InQuotedField;
                    } else if byte == self.delimiter {
                        row.push(mem::take(&mut field));
                        seen_content = true;
                    } else {
                        field.push(byte);
                        seen_content = true;
                    }
                }
                ScanState::InQuotedField => match self.source.get()? {
                    Some(QUOTE) => state = ScanState::AfterQuoteInField,
                    Some(byte) => field.push(byte),
                    // unterminated quote: keep what we have
                    None => state = ScanState::InField,
                },
                ScanState::AfterQuoteInField => {
                    if self.source.peek()? == Some(QUOTE) {
                        self.source.get()?;
                        field.push(QUOTE);
                        state = ScanState::InQuotedField;
                    } else {
                        state = ScanState::InField;
                    }
                }
            }
        }

        trace!("read row {} with {} fields", self.n_rows, row.len());
        self.n_rows += 1;
        Ok(true)
    }

    /// Reads the next row into `row` as UTF-8 strings, replacing its contents.
    ///
    /// Same as [`read_byte_row`](RowReader::read_byte_row), except that a field which is not
    /// valid UTF-8 yields `DsvError::Utf8`. The row is consumed from the source either way,
    /// and `row` is left empty on any error.
    pub fn read_row(&mut self, row: &mut Row) -> Result<bool> {
        row.clear();
        let mut byte_row = ByteRow::new();
        if !self.read_byte_row(&mut byte_row)? {
            return Ok(false);
        }
        let row_idx = self.n_rows - 1;
        *row = byte_row
            .into_iter()
            .enumerate()
            .map(|(field_idx, field)| field_to_string(field, row_idx, field_idx))
            .collect::<Result<Row>>()?;
        Ok(true)
    }

    /// Iterates over the remaining rows as strings.
    pub fn rows(&mut self) -> RowsIter<'_, S> {
        RowsIter { reader: self, is_done: false }
    }

    /// Iterates over the remaining rows as raw bytes.
    pub fn byte_rows(&mut self) -> ByteRowsIter<'_, S> {
        ByteRowsIter { reader: self, is_done: false }
    }
}

fn field_to_string(field: Vec<u8>, row: u64, field_idx: usize) -> Result<String> {
    match simdutf8::compat::from_utf8(&field) {
        // SAFETY: `field` was just validated as UTF-8
        Ok(_) => Ok(unsafe { String::from_utf8_unchecked(field) }),
        Err(err) => Err(DsvError::Utf8 { row, field: field_idx, valid_up_to: err.valid_up_to() }),
    }
}

/// Iterator over the rows of a [`RowReader`], created by [`RowReader::rows`].
///
/// Stops after the first error.
pub struct RowsIter<'a, S: 'a> {
    reader: &'a mut RowReader<S>,
    is_done: bool,
}

impl<'a, S: DataSource> Iterator for RowsIter<'a, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        if self.is_done {
            return None;
        }
        let mut row = Row::new();
        match self.reader.read_row(&mut row) {
            Ok(true) => Some(Ok(row)),
            Ok(false) => {
                self.is_done = true;
                None
            }
            Err(e) => {
                self.is_done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterator over the rows of a [`RowReader`] as bytes, created by [`RowReader::byte_rows`].
///
/// Stops after the first error.
pub struct ByteRowsIter<'a, S: 'a> {
    reader: &'a mut RowReader<S>,
    is_done: bool,
}

impl<'a, S: DataSource> Iterator for ByteRowsIter<'a, S> {
    type Item = Result<ByteRow>;

    fn next(&mut self) -> Option<Result<ByteRow>> {
        if self.is_done {
            return None;
        }
        let mut row = ByteRow::new();
        match self.reader.read_byte_row(&mut row) {
            Ok(true) => Some(Ok(row)),
            Ok(false) => {
                self.is_done = true;
                None
            }
            Err(e) => {
                self.is_done = true;
                Some(Err(e))
            }
        }
    }
}
