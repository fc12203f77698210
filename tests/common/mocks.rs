//! Mocks for sinks and writers that fail on demand.
use csv::StringRecord;
use mockall::mock;

use std::io::{self, Write};

use ynab_discover::core::item::{ItemWriter, ItemWriterResult};

mock! {
    pub File {}
    impl Write for File {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

mock! {
    pub RecordWriter {}
    impl ItemWriter<StringRecord> for RecordWriter {
        fn write(&self, item: &StringRecord) -> ItemWriterResult;
        fn flush(&self) -> ItemWriterResult;
        fn open(&self) -> ItemWriterResult;
        fn close(&self) -> ItemWriterResult;
    }
}
