//! Organization Handlers

pub(crate) mod batch_example;
pub(crate) mod batch_import;
pub(crate) mod count;
pub(crate) mod create;
pub(crate) mod freeze;
pub(crate) mod get;
pub(crate) mod in_arrears;
pub(crate) mod index;
pub(crate) mod invite_member;
pub(crate) mod remove_member;
pub(crate) mod unfreeze;
pub(crate) mod update;
pub(crate) mod update_member;

/// Total number of matching records on collection responses.
pub(crate) const X_TOTAL_COUNT: &str = "x-total-count";
