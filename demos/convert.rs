use std::io;
use std::path::Path;

use dsv_rows::{Dialect, Row};

// Rewrites the semicolon-separated fixture as tab-separated values on stdout.
fn main() {
    let data_filepath = Path::new(file!())
        .parent()
        .unwrap()
        .join("../tests/data/semicolon.csv");
    let mut reader = Dialect::new(b';').open_path(data_filepath).unwrap();
    let mut writer = Dialect::new(b'\t').open_write(io::stdout().lock());

    let mut row = Row::new();
    while reader.read_row(&mut row).unwrap() {
        writer.write_row(&row).unwrap();
    }
    writer.flush().unwrap();
    eprintln!("converted {} rows", writer.row_count());
}
