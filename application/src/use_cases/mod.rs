//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke;
pub mod run_consultation;
