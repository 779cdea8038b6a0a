//! Back-office domain services over the remote resource service.

pub mod auth;
pub mod context;
pub mod domain;
pub mod remote;
pub mod uuids;

#[cfg(test)]
mod test;
