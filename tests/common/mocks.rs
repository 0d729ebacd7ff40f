//! Mock version of a `DataSink`.
use mockall::mock;

use std::io;

use dsv_rows::DataSink;

mock! {
    pub Sink {}
    impl DataSink for Sink {
        fn put(&mut self, byte: u8) -> io::Result<()>;
        fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
        fn flush(&mut self) -> io::Result<()>;
    }
}
