//! Subscription Event Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Subscription Event UUID
pub type SubscriptionEventUuid = TypedUuid<SubscriptionEventRecord>;

/// Subscription UUID
pub type SubscriptionUuid = TypedUuid<SubscriptionSummary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionEventType {
    Provision,
    Modify,
    Suspend,
    Reactivate,
    Cancel,

    #[serde(other)]
    Other,
}

impl SubscriptionEventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provision => "provision",
            Self::Modify => "modify",
            Self::Suspend => "suspend",
            Self::Reactivate => "reactivate",
            Self::Cancel => "cancel",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionEventStatus {
    Requested,
    Approved,
    Rejected,
    Fulfilled,
    Failed,

    #[serde(other)]
    Other,
}

impl SubscriptionEventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Fulfilled => "fulfilled",
            Self::Failed => "failed",
            Self::Other => "other",
        }
    }
}

/// Id and display name of a related resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedSummary {
    pub id: String,
    pub name: Option<String>,
}

/// The subscription an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSummary {
    pub id: String,
    pub status: Option<String>,
    pub organization: Option<RelatedSummary>,
    pub product: Option<RelatedSummary>,
}

/// Subscription Event Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEventRecord {
    pub uuid: SubscriptionEventUuid,
    pub event_type: SubscriptionEventType,
    pub status: SubscriptionEventStatus,
    pub message: Option<String>,
    pub created_at: Option<Timestamp>,
    pub subscription: Option<SubscriptionSummary>,
    pub product_pricing: Option<RelatedSummary>,
}
