//! CSV support for streaming raw records.
//!
//! Both components work on `csv::StringRecord` rather than deserialized
//! structs: the converter rewrites one field by position and must pass every
//! other column through untouched, whatever the bank adds to its export.
//!
//! 1. **CsvRecordReader**: reads the header once, then one data row per call.
//!    Fields are never trimmed and rows must be as wide as the header.
//!
//! 2. **CsvRecordWriter**: writes records with minimal quoting and `\n`
//!    terminators.
//!
//! Both follow the builder pattern and implement the core `ItemReader` and
//! `ItemWriter` traits, so they plug straight into a `Step`.
//!
//! # Examples
//!
//! ```
//! use ynab_discover::item::csv::csv_reader::CsvRecordReaderBuilder;
//! use ynab_discover::item::csv::csv_writer::CsvRecordWriterBuilder;
//! use ynab_discover::core::item::{ItemReader, ItemWriter};
//!
//! let input = "name,note\nAlice,\"plain\"\n";
//!
//! let reader = CsvRecordReaderBuilder::new().from_reader(input.as_bytes());
//! let writer = CsvRecordWriterBuilder::new().from_writer(Vec::new());
//!
//! writer.write_header(&reader.read_header().unwrap()).unwrap();
//! while let Some(row) = reader.read().unwrap() {
//!     writer.write(&row).unwrap();
//! }
//!
//! let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//! assert_eq!(output, "name,note\nAlice,plain\n");
//! ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;

/// A module providing facilities for writing CSV data records.
pub mod csv_writer;
