use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::*;
use crate::reader::RowReader;
use crate::sink::{DataSink, WriterSink};
use crate::source::{DataSource, ReaderSource};
use crate::writer::RowWriter;

/// The quote character. Fields containing it are quoted, and it is doubled inside quotes.
pub const QUOTE: u8 = b'"';
/// The row terminator.
pub const TERMINATOR: u8 = b'\n';
/// The delimiter used when none is given, or when the quote character is requested.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Returns the delimiter actually used for a requested one: the quote character can never
/// separate fields, so it falls back to a comma.
pub fn normalize_delimiter(delimiter: u8) -> u8 {
    if delimiter == QUOTE {
        debug!("quote character requested as delimiter, using ',' instead");
        DEFAULT_DELIMITER
    } else {
        delimiter
    }
}

/// Parses user-supplied delimiter text, e.g. from a command line.
///
/// Accepts a single ASCII character, an escape (`\t`) or a name (`tab`, `comma`, `semicolon`,
/// `pipe`, `space`). Newline and carriage return cannot be delimiters. A `"` parses fine and
/// is normalized to `,` like everywhere else.
pub fn parse_delimiter(text: &str) -> Result<u8> {
    let delimiter = match text {
        "tab" | "\\t" => b'\t',
        "comma" => b',',
        "semicolon" => b';',
        "pipe" => b'|',
        "space" => b' ',
        _ => match text.as_bytes() {
            &[byte] if byte.is_ascii() => byte,
            _ => return Err(DsvError::InvalidDelimiter(text.to_string())),
        },
    };
    if delimiter == TERMINATOR || delimiter == b'\r' {
        return Err(DsvError::InvalidDelimiter(text.to_string()));
    }
    Ok(normalize_delimiter(delimiter))
}

/// Dialect of a DSV stream: the field delimiter, and whether every field is quoted on output.
///
/// The delimiter is normalized on construction (see [`normalize_delimiter`]) and cannot be
/// changed afterward.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    delimiter: u8,
    quote_all: bool,
}
impl Default for Dialect {
    fn default() -> Dialect {
        Dialect { delimiter: DEFAULT_DELIMITER, quote_all: false }
    }
}
impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("delimiter", &char::from(self.delimiter))
            .field("quote_all", &self.quote_all)
            .finish()
    }
}
impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Dialect:")?;
        writeln!(f, "\tDelimiter: {}", match self.delimiter {
            b'\t' => "tab".to_string(),
            b' ' => "space".to_string(),
            chr => format!("{}", char::from(chr)),
        })?;
        writeln!(f, "\tQuote character: {}", char::from(QUOTE))?;
        writeln!(f, "\tQuote all fields?: {}", self.quote_all)
    }
}
impl Dialect {
    pub fn new(delimiter: u8) -> Dialect {
        Dialect { delimiter: normalize_delimiter(delimiter), quote_all: false }
    }

    /// Quote every field on output, not only those that need it.
    pub fn quote_all(mut self, yes: bool) -> Dialect {
        self.quote_all = yes;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn is_quote_all(&self) -> bool {
        self.quote_all
    }

    pub fn open_reader<S: DataSource>(&self, source: S) -> RowReader<S> {
        RowReader::new(source, self.delimiter)
    }

    pub fn open_writer<S: DataSink>(&self, sink: S) -> RowWriter<S> {
        RowWriter::new(sink, self.delimiter, self.quote_all)
    }

    /// Opens a reader over any `std::io::Read`.
    pub fn open_read<R: Read>(&self, rdr: R) -> RowReader<ReaderSource<R>> {
        self.open_reader(ReaderSource::new(rdr))
    }

    /// Opens a writer over any `std::io::Write`.
    pub fn open_write<W: Write>(&self, wtr: W) -> RowWriter<WriterSink<W>> {
        self.open_writer(WriterSink::new(wtr))
    }

    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<RowReader<ReaderSource<File>>> {
        Ok(self.open_read(File::open(path)?))
    }

    /// Creates (or truncates) the file at `path` and opens a buffered writer over it. Call
    /// `flush` on the writer to surface errors from the final write.
    pub fn create_path<P: AsRef<Path>>(&self, path: P)
        -> Result<RowWriter<WriterSink<BufWriter<File>>>>
    {
        Ok(self.open_write(BufWriter::new(File::create(path)?)))
    }
}
