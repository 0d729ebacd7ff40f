use std::io::Cursor;

use dsv_rows::{Dialect, Row, RowReader, RowWriter, StringDataSink, StringDataSource};

fn tricky_rows() -> Vec<Row> {
    let rows: Vec<Vec<&str>> = vec![
        vec!["hello", "world"],
        vec!["foo", "bar", "baz"],
        vec!["a,b", "c\"d", "e\nf"],
        vec![],
        vec!["", ""],
        vec!["\"", "\"\"", "\"start", "end\""],
        vec!["trailing\n", "\n", ",", ";", "\t"],
        vec!["crlf\r\n", "cr\r"],
        vec!["ünïcödé", "日本語"],
    ];
    rows.into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
}

fn write_all(dialect: Dialect, rows: &[Row]) -> Vec<u8> {
    let mut writer = dialect.open_writer(StringDataSink::new());
    for row in rows {
        writer.write_row(row).unwrap();
    }
    writer.into_inner().into_bytes()
}

fn read_all(dialect: Dialect, data: Vec<u8>) -> Vec<Row> {
    let mut reader = dialect.open_reader(StringDataSource::new(data));
    let rows = reader.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert!(reader.is_finished());
    rows
}

#[test]
fn test_roundtrip() {
    for &delimiter in &[b',', b';', b'\t', b'|', b'"'] {
        for &quote_all in &[false, true] {
            let dialect = Dialect::new(delimiter).quote_all(quote_all);
            let rows = tricky_rows();
            assert_eq!(read_all(dialect, write_all(dialect, &rows)), rows, "{:?}", dialect);
        }
    }
}

#[test]
fn test_roundtrip_through_io() {
    let dialect = Dialect::new(b'\t');
    let rows = tricky_rows();

    let mut writer = dialect.open_write(Vec::new());
    for row in &rows {
        writer.write_row(row).unwrap();
    }
    writer.flush().unwrap();
    let data = writer.into_inner().into_inner();

    let mut reader = dialect.open_read(Cursor::new(data));
    let read_back = reader.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(read_back, rows);
}

#[test]
fn test_quoting_is_minimal() {
    let mut writer = RowWriter::new(StringDataSink::new(), b',', false);
    writer.write_row(["plain", "with space", "semi;colon", "tab\there", "cr\r"]).unwrap();
    let out = writer.into_inner().into_string().unwrap();
    assert_eq!(out, "plain,with space,semi;colon,tab\there,cr\r\n");
    assert!(!out.contains('"'));
}

#[test]
fn test_quotes_are_doubled() {
    for n in 0..5 {
        let field = format!("x{}y", "\"".repeat(n));
        let mut writer = RowWriter::new(StringDataSink::new(), b',', true);
        writer.write_row([&field]).unwrap();
        let out = writer.into_inner().into_string().unwrap();
        // two wrapping quotes plus each inner quote doubled
        assert_eq!(out.matches('"').count(), 2 + 2 * n);
    }
}

#[test]
fn test_readable_by_csv_crate() {
    // carriage returns are content here, but the csv crate has its own ideas about them
    let rows: Vec<Row> = tricky_rows()
        .into_iter()
        .filter(|row| !row.iter().any(|field| field.contains('\r')))
        .collect();
    let data = write_all(Dialect::new(b';'), &rows);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .from_reader(&data[..]);
    let parsed: Vec<Vec<String>> = csv_reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();

    // the csv crate skips blank lines, which is where a zero-field row goes
    let expected: Vec<Row> = rows.into_iter().filter(|row| !row.is_empty()).collect();
    assert_eq!(parsed, expected);
}

#[test]
fn test_single_empty_field() {
    // unquoted, a lone empty field is indistinguishable from a blank line
    let rows = vec![vec![String::new()]];
    assert_eq!(read_all(Dialect::default(), write_all(Dialect::default(), &rows)), vec![Row::new()]);

    let quoted = Dialect::default().quote_all(true);
    assert_eq!(write_all(quoted, &rows), b"\"\"\n");
    assert_eq!(read_all(quoted, write_all(quoted, &rows)), rows);
}

#[test]
fn test_reads_csv_crate_output() {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(vec![]);
    csv_writer.write_record(["a b", "c,d", "e\"f"]).unwrap();
    csv_writer.write_record(["1", "", "multi\nline"]).unwrap();
    let data = csv_writer.into_inner().unwrap();

    let mut reader = RowReader::new(StringDataSource::new(data), b',');
    let rows = reader.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(rows, vec![vec!["a b", "c,d", "e\"f"], vec!["1", "", "multi\nline"]]);
}
