//! Batch import of organizations and their members from CSV.

pub mod data;
pub mod errors;
mod parse;
pub mod service;

pub use errors::*;
pub use parse::{BATCH_EXAMPLE_CSV, parse_rows};
pub use service::*;
