//! Back-office Domain Concerns

pub mod imports;
pub mod invites;
pub mod members;
pub mod organizations;
pub mod subscription_events;
pub mod users;
