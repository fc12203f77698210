//! Discover → YNAB row conversion.
//!
//! A Discover export names its transaction date column `Trans. Date` and
//! reports purchases as positive amounts. YNAB expects a `Date` column and
//! outflows as negative amounts. [`convert`] fixes both in one streaming pass.

use std::io::{Read, Write};

use csv::StringRecord;
use log::debug;

use crate::{
    core::{
        cancel::CancellationToken,
        item::{ItemProcessor, ItemProcessorResult},
        step::{StepBuilder, StepExecution},
    },
    error::ConvertError,
    item::csv::{csv_reader::CsvRecordReaderBuilder, csv_writer::CsvRecordWriterBuilder},
};

/// Transaction date column in the bank export.
pub const TRANS_DATE_COLUMN: &str = "Trans. Date";

/// Name the transaction date column is given in the output.
pub const DATE_COLUMN: &str = "Date";

/// Amount column, present under the same name in both formats.
pub const AMOUNT_COLUMN: &str = "Amount";

/// Position of the amount column, resolved once from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub amount_index: usize,
}

impl ColumnLayout {
    /// Validates `header` and returns it with `Trans. Date` renamed to `Date`.
    ///
    /// Only the first occurrence of each column name counts. All other header
    /// entries keep their value and position.
    ///
    /// # Errors
    /// `ConvertError::MissingColumn` naming whichever required column is absent,
    /// `Trans. Date` being checked first.
    pub fn resolve(header: &StringRecord) -> Result<(StringRecord, ColumnLayout), ConvertError> {
        let date_index = position(header, TRANS_DATE_COLUMN)
            .ok_or_else(|| ConvertError::MissingColumn(TRANS_DATE_COLUMN.to_string()))?;

        let renamed: StringRecord = header
            .iter()
            .enumerate()
            .map(|(index, name)| if index == date_index { DATE_COLUMN } else { name })
            .collect();

        let amount_index = position(&renamed, AMOUNT_COLUMN)
            .ok_or_else(|| ConvertError::MissingColumn(AMOUNT_COLUMN.to_string()))?;

        Ok((renamed, ColumnLayout { amount_index }))
    }
}

fn position(record: &StringRecord, name: &str) -> Option<usize> {
    record.iter().position(|field| field == name)
}

/// Flips the sign of an amount without parsing it.
///
/// A single leading `-` is removed; anything else gets one prepended. Going
/// through a float would risk changing the value, so this stays in string
/// land, even for values that are not numbers at all.
///
/// ```
/// use ynab_discover::discover::toggle_sign;
///
/// assert_eq!(toggle_sign("50.00"), "-50.00");
/// assert_eq!(toggle_sign("-50.00"), "50.00");
/// assert_eq!(toggle_sign(""), "-");
/// ```
pub fn toggle_sign(amount: &str) -> String {
    match amount.strip_prefix('-') {
        Some(positive) => positive.to_string(),
        None => format!("-{amount}"),
    }
}

/// Toggles the sign of the amount field of every row.
pub struct SignFlipProcessor {
    amount_index: usize,
}

impl SignFlipProcessor {
    pub fn new(amount_index: usize) -> Self {
        Self { amount_index }
    }
}

impl ItemProcessor<StringRecord, StringRecord> for SignFlipProcessor {
    fn process(&self, item: &StringRecord) -> ItemProcessorResult<StringRecord> {
        let Some(amount) = item.get(self.amount_index) else {
            let line = item.position().map_or(0, |position| position.line());
            return Err(ConvertError::RowRead(format!(
                "line {line}: no amount field at index {} in a row of {} fields",
                self.amount_index,
                item.len()
            )));
        };
        let flipped = toggle_sign(amount);

        Ok(item
            .iter()
            .enumerate()
            .map(|(index, field)| {
                if index == self.amount_index {
                    flipped.as_str()
                } else {
                    field
                }
            })
            .collect())
    }
}

/// Converts a Discover CSV export read from `input` into YNAB's import format
/// written to `output`.
///
/// The header is validated and rewritten first, so a missing column fails
/// before anything is written. Rows are then streamed one at a time; the
/// cancellation token is checked between rows and stops the conversion
/// cleanly, reported as `StepStatus::Stopped` rather than as an error.
///
/// Neither stream is closed here. Pass `&mut` handles to keep ownership.
///
/// # Errors
/// - `ConvertError::HeaderRead` for an empty or malformed first row
/// - `ConvertError::MissingColumn` if `Trans. Date` or `Amount` is absent
/// - `ConvertError::RowRead` for a malformed data row
/// - `ConvertError::Write` if writing or flushing the output fails
///
/// Rows written before a failure stay in `output`.
///
/// # Examples
///
/// ```
/// use ynab_discover::{core::cancel::CancellationToken, discover::convert};
///
/// let input = "\
/// Trans. Date,Post Date,Description,Amount,Category
/// 06/23/2023,06/26/2023,\"ACME STORE, INC 555-1234567 NY\",50.00,\"Services\"
/// ";
/// let mut output = Vec::new();
///
/// convert(&CancellationToken::new(), input.as_bytes(), &mut output).unwrap();
///
/// assert_eq!(
///     String::from_utf8(output).unwrap(),
///     "\
/// Date,Post Date,Description,Amount,Category
/// 06/23/2023,06/26/2023,\"ACME STORE, INC 555-1234567 NY\",-50.00,Services
/// "
/// );
/// ```
pub fn convert<R: Read, W: Write>(
    cancellation: &CancellationToken,
    input: R,
    output: W,
) -> Result<StepExecution, ConvertError> {
    let reader = CsvRecordReaderBuilder::new().from_reader(input);

    let header = reader.read_header()?;
    let (header, layout) = ColumnLayout::resolve(&header)?;
    debug!("Resolved columns: {:?}", layout);

    let writer = CsvRecordWriterBuilder::new().from_writer(output);
    writer.write_header(&header)?;

    let processor = SignFlipProcessor::new(layout.amount_index);

    let step = StepBuilder::new(&reader, &writer)
        .name("discover-to-ynab")
        .processor(&processor)
        .cancellation(cancellation.clone())
        .build();

    step.execute()
}

#[cfg(test)]
mod tests {
    use csv::StringRecord;

    use super::{ColumnLayout, SignFlipProcessor, toggle_sign};
    use crate::{core::item::ItemProcessor, error::ConvertError};

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn toggle_sign_should_only_touch_the_leading_character() {
        assert_eq!(toggle_sign("0.00"), "-0.00");
        assert_eq!(toggle_sign("-0.00"), "0.00");
        assert_eq!(toggle_sign("--5"), "-5");
        assert_eq!(toggle_sign("5-"), "-5-");
        assert_eq!(toggle_sign("1,234.56"), "-1,234.56");
        assert_eq!(toggle_sign(" -1"), "- -1");
    }

    #[test]
    fn toggle_sign_applied_twice_should_restore_the_value() {
        for value in ["50.00", "-50.00", "", "-", "abc", "-0"] {
            assert_eq!(toggle_sign(&toggle_sign(value)), value);
        }
    }

    #[test]
    fn resolve_should_rename_date_and_locate_amount() {
        let header = record(&["Trans. Date", "Post Date", "Description", "Amount", "Category"]);

        let (renamed, layout) = ColumnLayout::resolve(&header).unwrap();

        assert_eq!(
            renamed,
            vec!["Date", "Post Date", "Description", "Amount", "Category"]
        );
        assert_eq!(layout, ColumnLayout { amount_index: 3 });
    }

    #[test]
    fn resolve_should_only_rename_the_first_date_column() {
        let header = record(&["Amount", "Trans. Date", "Trans. Date"]);

        let (renamed, layout) = ColumnLayout::resolve(&header).unwrap();

        assert_eq!(renamed, vec!["Amount", "Date", "Trans. Date"]);
        assert_eq!(layout.amount_index, 0);
    }

    #[test]
    fn resolve_should_report_missing_date_before_missing_amount() {
        let header = record(&["Date", "Description"]);

        let result = ColumnLayout::resolve(&header);

        assert_eq!(
            result.unwrap_err(),
            ConvertError::MissingColumn("Trans. Date".to_string())
        );
    }

    #[test]
    fn resolve_should_report_missing_amount() {
        let header = record(&["Trans. Date", "Description"]);

        let result = ColumnLayout::resolve(&header);

        assert_eq!(
            result.unwrap_err(),
            ConvertError::MissingColumn("Amount".to_string())
        );
    }

    #[test]
    fn resolve_should_match_names_exactly() {
        let header = record(&["trans. date", " Trans. Date", "Amount"]);

        assert!(ColumnLayout::resolve(&header).is_err());
    }

    #[test]
    fn processor_should_flip_only_the_amount_field() {
        let processor = SignFlipProcessor::new(1);

        let row = processor
            .process(&record(&["06/23/2023", "50.00", "-3"]))
            .unwrap();

        assert_eq!(row, vec!["06/23/2023", "-50.00", "-3"]);
    }

    #[test]
    fn processor_should_fail_when_amount_is_out_of_range() {
        let processor = SignFlipProcessor::new(4);

        let result = processor.process(&record(&["06/23/2023", "50.00"]));

        assert!(matches!(result, Err(ConvertError::RowRead(_))));
    }
}
