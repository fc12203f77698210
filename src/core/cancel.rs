//! Cooperative cancellation shared between a running step and whoever may
//! want to stop it (typically an interrupt handler).
//!
//! Clones observe the same signal. `is_cancelled` does not need a runtime, so
//! the blocking step polls it between rows; a row that has started is always
//! written completely.
//!
//! ```
//! use ynab_discover::core::cancel::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let handle = token.clone();
//!
//! assert!(!token.is_cancelled());
//! handle.cancel();
//! assert!(token.is_cancelled());
//! ```

pub use tokio_util::sync::CancellationToken;
