//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation models that back each persona
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
