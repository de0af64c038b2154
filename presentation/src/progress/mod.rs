//! Progress reporting for consultation execution

pub mod channel;
pub mod reporter;
