/// Cooperative cancellation shared between a step and its caller
pub mod cancel;

/// Reader, processor and writer abstractions
pub mod item;

/// Read, process and write loop
pub mod step;
