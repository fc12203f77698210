use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::{cell::RefCell, io::Read};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::ConvertError,
};

/// A CSV reader yielding raw `StringRecord`s.
///
/// The first record is the header and must be consumed with
/// [`read_header`](CsvRecordReader::read_header) before any data row is read;
/// [`read`](ItemReader::read) then yields the remaining rows.
///
/// Fields are not trimmed, so every non-rewritten field reaches the writer
/// with exactly the content it had in the input. Parsing is strict: a row
/// whose width differs from the header is a read error.
///
/// # Examples
///
/// ```
/// use ynab_discover::item::csv::csv_reader::CsvRecordReaderBuilder;
/// use ynab_discover::core::item::ItemReader;
///
/// let data = "\
/// Trans. Date,Amount
/// 06/23/2023,50.00
/// ";
///
/// let reader = CsvRecordReaderBuilder::new().from_reader(data.as_bytes());
///
/// let header = reader.read_header().unwrap();
/// assert_eq!(header, vec!["Trans. Date", "Amount"]);
///
/// let row = reader.read().unwrap().unwrap();
/// assert_eq!(row, vec!["06/23/2023", "50.00"]);
///
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvRecordReader<R> {
    /// Uses `RefCell` so rows can be pulled through the `&self` receiver of
    /// `ItemReader`.
    reader: RefCell<Reader<R>>,
}

impl<R: Read> CsvRecordReader<R> {
    /// Reads the first record of the stream as the header.
    ///
    /// # Errors
    /// - `ConvertError::HeaderRead` if the stream holds no record at all or
    ///   the first record is malformed.
    pub fn read_header(&self) -> Result<StringRecord, ConvertError> {
        let mut header = StringRecord::new();
        match self.reader.borrow_mut().read_record(&mut header) {
            Ok(true) => Ok(header),
            Ok(false) => Err(ConvertError::HeaderRead(
                "input contains no header row".to_string(),
            )),
            Err(error) => Err(ConvertError::HeaderRead(error.to_string())),
        }
    }
}

impl<R: Read> ItemReader<StringRecord> for CsvRecordReader<R> {
    /// Reads the next data row.
    ///
    /// # Returns
    /// - `Ok(Some(record))` if a row is successfully read
    /// - `Ok(None)` at the end of the stream
    /// - `Err(ConvertError::RowRead(_))` if the row is malformed or is not
    ///   valid UTF-8
    fn read(&self) -> ItemReaderResult<StringRecord> {
        let mut record = StringRecord::new();
        match self.reader.borrow_mut().read_record(&mut record) {
            Ok(true) => Ok(Some(record)),
            Ok(false) => Ok(None),
            Err(error) => Err(ConvertError::RowRead(error.to_string())),
        }
    }
}

/// A builder for configuring CSV record reading.
///
/// # Configuration
///
/// - Delimiter: comma (,)
/// - Fields: not trimmed
/// - Width: every row must be as wide as the header
#[derive(Default)]
pub struct CsvRecordReaderBuilder {}

impl CsvRecordReaderBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// Creates a `CsvRecordReader` from any source implementing `Read`.
    ///
    /// The header is read as an ordinary record (`has_headers(false)`) so that
    /// an empty stream can be told apart from an empty header.
    pub fn from_reader<R: Read>(self, rdr: R) -> CsvRecordReader<R> {
        let rdr = ReaderBuilder::new()
            .trim(Trim::None)
            .has_headers(false)
            .flexible(false) // Use strict parsing to catch formatting errors
            .from_reader(rdr);

        CsvRecordReader {
            reader: RefCell::new(rdr),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::{
        core::item::ItemReader, error::ConvertError,
        item::csv::csv_reader::CsvRecordReaderBuilder,
    };

    #[test]
    fn quoted_fields_should_be_unescaped() -> Result<(), Box<dyn Error>> {
        let data = "Description,Amount
\"ACME STORE, INC 555-1234567 NY\",50.00
\"say \"\"hi\"\"\",1.00
\"two
lines\",2.00";

        let reader = CsvRecordReaderBuilder::new().from_reader(data.as_bytes());
        reader.read_header()?;

        let mut rows = Vec::new();
        while let Some(row) = reader.read()? {
            rows.push(row);
        }

        assert_eq!(
            rows,
            vec![
                vec!["ACME STORE, INC 555-1234567 NY", "50.00"],
                vec!["say \"hi\"", "1.00"],
                vec!["two\nlines", "2.00"],
            ]
        );

        Ok(())
    }

    #[test]
    fn fields_should_not_be_trimmed() -> Result<(), Box<dyn Error>> {
        let data = "a,b\n  padded , 1.00 \n";

        let reader = CsvRecordReaderBuilder::new().from_reader(data.as_bytes());
        reader.read_header()?;

        let row = reader.read()?.ok_or("missing row")?;
        assert_eq!(row, vec!["  padded ", " 1.00 "]);

        Ok(())
    }

    #[test]
    fn empty_input_should_fail_header_read() {
        let reader = CsvRecordReaderBuilder::new().from_reader("".as_bytes());

        let result = reader.read_header();

        assert!(matches!(result, Err(ConvertError::HeaderRead(_))));
    }

    #[test]
    fn row_wider_than_header_should_fail() -> Result<(), Box<dyn Error>> {
        let data = "a,b\n1,2\n1,2,3\n";

        let reader = CsvRecordReaderBuilder::new().from_reader(data.as_bytes());
        reader.read_header()?;

        assert!(reader.read()?.is_some());
        assert!(matches!(reader.read(), Err(ConvertError::RowRead(_))));

        Ok(())
    }

    #[test]
    fn bare_quote_inside_unquoted_field_should_be_kept() -> Result<(), Box<dyn Error>> {
        let data = "a,b\nAB\"C,1.00\n";

        let reader = CsvRecordReaderBuilder::new().from_reader(data.as_bytes());
        reader.read_header()?;

        assert_eq!(reader.read()?, Some(vec!["AB\"C", "1.00"].into()));

        Ok(())
    }
}
