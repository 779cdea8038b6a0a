//! Authentication and authorization

mod ability;
mod context;
mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use ability::{Forbidden, Gate, authorize};
pub use context::*;
pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
