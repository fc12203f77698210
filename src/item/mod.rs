/// This module provides a CSV record reader and writer implementation.
pub mod csv;
