//! Subscription Events

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::SubscriptionEventsServiceError;
pub use service::*;
