//! Organization Members

pub mod data;
pub mod errors;
pub mod role;
pub mod service;

pub use errors::MembersServiceError;
pub use service::*;
