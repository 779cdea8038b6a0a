//! Users

pub mod data;
pub mod password;
pub mod records;
mod repository;

pub(crate) use repository::RemoteUsersRepository;
