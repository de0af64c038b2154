//! Output formatting for consultation responses

pub mod console;
pub mod formatter;
