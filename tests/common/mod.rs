#![allow(dead_code)]

pub mod mocks;

pub use mocks::{MockFile, MockRecordWriter};

pub const DISCOVER_HEADER: &str = "Trans. Date,Post Date,Description,Amount,Category";

pub const YNAB_HEADER: &str = "Date,Post Date,Description,Amount,Category";
