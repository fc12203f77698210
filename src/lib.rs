/*!
 # ynab-discover

 Converts a CSV export downloaded from Discover into a file YNAB can import.

 Two things differ between the formats:

 - Discover calls its transaction date column `Trans. Date`; YNAB wants `Date`.
 - Discover reports purchases as positive amounts; YNAB treats positive
   amounts as inflows.

 The conversion renames the column and flips the sign of every amount in one
 streaming pass. Every other column is passed through untouched.

 ## Core Concepts

 The conversion is a single read → process → write step:

 - **ItemReader:** pulls one CSV row at a time (`CsvRecordReader`).
 - **ItemProcessor:** rewrites the row (`SignFlipProcessor`).
 - **ItemWriter:** writes the row straight away (`CsvRecordWriter`).
 - **Step:** drives the loop and checks a `CancellationToken` between rows.

 ## Getting Started

```rust
use ynab_discover::{
    core::{cancel::CancellationToken, step::StepStatus},
    discover::convert,
    error::ConvertError,
};

fn main() -> Result<(), ConvertError> {
    let csv = "Trans. Date,Post Date,Description,Amount,Category
06/23/2023,06/26/2023,PAYMENT REFUND,-50.00,\"Services\"";

    let mut output = Vec::new();
    let execution = convert(&CancellationToken::new(), csv.as_bytes(), &mut output)?;

    assert_eq!(execution.status, StepStatus::Completed);
    assert_eq!(
        String::from_utf8_lossy(&output),
        "Date,Post Date,Description,Amount,Category\n06/23/2023,06/26/2023,PAYMENT REFUND,50.00,Services\n"
    );

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module for the read, process and write step
pub mod core;

/// Discover to YNAB conversion
pub mod discover;

/// Error types for conversion
pub mod error;

#[doc(inline)]
pub use error::*;

/// Item readers and writers (CSV)
pub mod item;
