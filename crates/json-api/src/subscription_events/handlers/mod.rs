//! Subscription Event Handlers

pub(crate) mod approve;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod reject;
