use std::io;

use thiserror::Error;

/// An error that occurs while reading or writing DSV rows.
///
/// Malformed input (an unterminated quote, stray quotes inside an unquoted field) is never an
/// error: the reader decodes it on a best-effort basis. Running out of rows is not an error
/// either; `read_row` reports it with `Ok(false)`.
#[derive(Debug, Error)]
pub enum DsvError {
    /// An I/O error from the underlying source or sink
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A field that is not valid UTF-8 was read through the `String` interface
    #[error("invalid UTF-8 in row {row}, field {field} (valid up to byte {valid_up_to})")]
    Utf8 {
        /// Zero-based index of the row in the stream
        row: u64,
        /// Zero-based index of the field within the row
        field: usize,
        /// Length of the valid UTF-8 prefix of the field
        valid_up_to: usize,
    },
    /// Text that cannot be turned into a single-byte delimiter
    #[error("invalid delimiter: {0:?}")]
    InvalidDelimiter(String),
}

pub type Result<T> = ::std::result::Result<T, DsvError>;
