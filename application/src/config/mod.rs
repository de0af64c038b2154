//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-invocation generation settings, timeout and retry policy

pub mod execution_params;

pub use execution_params::ExecutionParams;
