use std::{cell::RefCell, io::Write, result};

use csv::{QuoteStyle, StringRecord, Writer, WriterBuilder};

use crate::{
    core::item::{ItemWriter, ItemWriterResult},
    error::ConvertError,
};

/// A CSV writer emitting raw `StringRecord`s.
///
/// Fields are only quoted when they contain a delimiter, a quote or a line
/// break, so a field such as `"Services"` in the input comes out as
/// `Services`. Records end with `\n`.
pub struct CsvRecordWriter<T: Write> {
    wrapper: RefCell<Writer<T>>,
}

impl<T: Write> CsvRecordWriter<T> {
    pub fn write_header(&self, header: &StringRecord) -> ItemWriterResult {
        self.write_record(header)
    }

    fn write_record(&self, record: &StringRecord) -> ItemWriterResult {
        self.wrapper
            .borrow_mut()
            .write_record(record)
            .map_err(|error| ConvertError::Write(error.to_string()))
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(self) -> result::Result<T, ConvertError> {
        let result = self.wrapper.into_inner().into_inner();
        match result {
            Ok(inner) => Ok(inner),
            Err(error) => Err(ConvertError::Write(error.error().to_string())),
        }
    }
}

impl<T: Write> ItemWriter<StringRecord> for CsvRecordWriter<T> {
    fn write(&self, item: &StringRecord) -> ItemWriterResult {
        self.write_record(item)
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    ///
    /// Note that this also flushes the underlying writer.
    fn flush(&self) -> ItemWriterResult {
        let result = self.wrapper.borrow_mut().flush();
        match result {
            Ok(()) => Ok(()),
            Err(error) => Err(ConvertError::Write(error.to_string())),
        }
    }
}

#[derive(Default)]
pub struct CsvRecordWriterBuilder {}

impl CsvRecordWriterBuilder {
    pub fn new() -> CsvRecordWriterBuilder {
        CsvRecordWriterBuilder {}
    }

    /// Wraps any `Write` sink.
    ///
    /// ```
    /// # use std::error::Error;
    /// # use csv::StringRecord;
    /// # use ynab_discover::{item::csv::csv_writer::CsvRecordWriterBuilder, core::item::ItemWriter};
    /// # fn main() { example().unwrap(); }
    /// fn example() -> Result<(), Box<dyn Error>> {
    ///     let wtr = CsvRecordWriterBuilder::new().from_writer(vec![]);
    ///
    ///     wtr.write_header(&StringRecord::from(vec!["Date", "Description", "Amount"]))?;
    ///     wtr.write(&StringRecord::from(vec!["06/23/2023", "ACME STORE, INC", "-50.00"]))?;
    ///
    ///     let data = String::from_utf8(wtr.into_inner()?)?;
    ///     assert_eq!(data, "\
    /// Date,Description,Amount
    /// 06/23/2023,\"ACME STORE, INC\",-50.00
    /// ");
    ///     Ok(())
    /// }
    /// ```
    pub fn from_writer<W: Write>(self, wtr: W) -> CsvRecordWriter<W> {
        let wtr = WriterBuilder::new()
            .flexible(true)
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(wtr);

        CsvRecordWriter {
            wrapper: RefCell::new(wtr),
        }
    }
}
