use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
/// Conversion error
///
/// Every variant names the phase that failed. Rows written before the failure
/// stay in the output.
pub enum ConvertError {
    #[error("could not read header: {0}")]
    HeaderRead(String),

    #[error("could not find column: {0}")]
    MissingColumn(String),

    #[error("failed to read next row: {0}")]
    RowRead(String),

    #[error("could not write row: {0}")]
    Write(String),
}
