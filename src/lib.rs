/*!
Reading and writing delimiter-separated-value (DSV) rows: CSV, TSV, and friends.

A [`RowReader`] pulls bytes from a [`DataSource`] and decodes them into rows, one row per
call; a [`RowWriter`] serializes rows into a [`DataSink`]. The format is:

- fields separated by a single delimiter byte (`,` by default; `"` is never a delimiter and
  falls back to `,`),
- fields containing the delimiter, `"` or `\n` wrapped in `"..."`, with inner quotes doubled,
- rows terminated by `\n` (the final one may lack it), `\r` being ordinary content,
- a bare `\n` line being a row with zero fields.

```
use dsv_rows::{Dialect, Row, StringDataSink, StringDataSource};

let mut sink = StringDataSink::new();
let mut wtr = Dialect::new(b';').open_writer(&mut sink);
wtr.write_row(["id", "note"]).unwrap();
wtr.write_row(["1", "semi;colon"]).unwrap();
assert_eq!(sink.to_string_lossy(), "id;note\n1;\"semi;colon\"\n");

let mut rdr = Dialect::new(b';').open_reader(StringDataSource::new(sink.into_bytes()));
let mut row = Row::new();
rdr.read_row(&mut row).unwrap();
assert_eq!(row, vec!["id", "note"]);
rdr.read_row(&mut row).unwrap();
assert_eq!(row, vec!["1", "semi;colon"]);
assert!(rdr.is_finished());
```
*/

pub mod dialect;
pub use dialect::{parse_delimiter, Dialect};

pub mod error;
pub use error::{DsvError, Result};

mod reader;
pub use reader::{ByteRow, ByteRowsIter, Row, RowReader, RowsIter};

mod writer;
pub use writer::RowWriter;

pub mod sink;
pub use sink::{DataSink, StringDataSink, WriterSink};

pub mod source;
pub use source::{DataSource, ReaderSource, StringDataSource};
