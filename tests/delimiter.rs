use std::path::Path;

use dsv_rows::{Dialect, Row, RowReader, RowWriter, StringDataSink, StringDataSource};

fn read_path(file: &str, delimiter: u8) -> Vec<Row> {
    let data_filepath = Path::new(file!()).parent().unwrap().join(file);
    let mut reader = Dialect::new(delimiter).open_path(data_filepath).unwrap();
    let rows = reader.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert!(reader.is_finished());
    rows
}

#[test]
fn test_semicolon() {
    assert_eq!(read_path("data/semicolon.csv", b';'), vec![
        vec!["city", "country", "pop"],
        vec!["Boston", "United States", "4628910"],
        vec!["Concord", "United States", "42695"],
    ]);
}

#[test]
fn test_tab() {
    assert_eq!(read_path("data/tabs.tsv", b'\t'), vec![
        vec!["name", "note"],
        vec!["alpha", "first entry"],
        vec!["beta", "tab\there"],
    ]);
}

#[test]
fn test_quoted_pipes() {
    let rows = read_path("data/quoted_pipes.txt", b'|');
    assert_eq!(rows, vec![
        vec!["id", "comment"],
        vec!["1", "say \"hi\""],
        vec!["2", "multi\nline"],
        vec![],
        vec!["3", ""],
    ]);
}

#[test]
fn test_wrong_delimiter_gives_single_fields() {
    assert_eq!(read_path("data/semicolon.csv", b',')[1], vec!["Boston;United States;4628910"]);
}

#[test]
fn test_quote_delimiter_reads_like_comma() {
    let data = "a,\"b,c\"\nd,e\n";
    let mut quote = RowReader::new(StringDataSource::from(data), b'"');
    let mut comma = RowReader::new(StringDataSource::from(data), b',');
    assert_eq!(quote.delimiter(), b',');
    let from_quote = quote.rows().collect::<Result<Vec<_>, _>>().unwrap();
    let from_comma = comma.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(from_quote, from_comma);
    assert_eq!(from_quote, vec![vec!["a", "b,c"], vec!["d", "e"]]);
}

#[test]
fn test_quote_delimiter_writes_like_comma() {
    let rows: &[&[&str]] = &[&["a", "b"], &["c,d", "e\"f"], &[]];
    let mut outputs = vec![];
    for &delimiter in &[b'"', b','] {
        let mut writer = RowWriter::new(StringDataSink::new(), delimiter, false);
        for row in rows {
            writer.write_row(row.iter()).unwrap();
        }
        outputs.push(writer.into_inner().into_string().unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], "a,b\n\"c,d\",\"e\"\"f\"\n\n");
}
