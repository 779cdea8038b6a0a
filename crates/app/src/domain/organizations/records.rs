//! Organization Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        invites::records::OrgaInviteRecord, members::role::MemberRole,
        users::records::UserRecord,
    },
    uuids::TypedUuid,
};

/// Organization UUID
pub type OrganizationUuid = TypedUuid<OrganizationRecord>;

/// Application Instance UUID
pub type AppInstanceUuid = TypedUuid<AppInstanceRecord>;

/// Organization Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationRecord {
    pub uuid: OrganizationUuid,

    /// Short human readable identifier, e.g. `org-fbba`.
    pub uid: Option<String>,

    pub name: String,

    /// Identifier of the organization in the customer's own systems.
    pub external_id: Option<String>,

    /// ISO 4217 code.
    pub billing_currency: Option<String>,

    pub account_frozen: bool,
    pub soa_enabled: bool,
    pub demo_account: bool,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub financial_year_end_month: Option<u8>,
    pub geo: GeoMetadata,
    pub main_address: Option<Address>,

    /// Instances of every status; empty unless loaded with dependencies.
    pub app_instances: Vec<AppInstanceRecord>,

    pub members: Vec<OrganizationMember>,
    pub invites: Vec<OrgaInviteRecord>,
    pub created_at: Option<Timestamp>,
}

impl OrganizationRecord {
    /// Instances counting towards the one-per-application limit.
    pub fn active_app_instances(&self) -> impl Iterator<Item = &AppInstanceRecord> {
        self.app_instances.iter().filter(|instance| instance.is_active())
    }
}

/// Geolocation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoMetadata {
    #[serde(default, rename = "geo_country_code")]
    pub country: Option<String>,

    #[serde(default, rename = "geo_state_code")]
    pub state: Option<String>,

    #[serde(default, rename = "geo_city")]
    pub city: Option<String>,

    #[serde(default, rename = "geo_tz")]
    pub tz: Option<String>,

    #[serde(default, rename = "geo_currency")]
    pub currency: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state_code: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,
}

/// A user belonging to an organization, with their role in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationMember {
    pub user: UserRecord,
    pub role: MemberRole,
}

/// Lifecycle status of an application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppInstanceStatus {
    Provisioning,
    Active,
    Terminated,
}

impl AppInstanceStatus {
    /// Statuses counting as "active".
    pub const ACTIVE: [Self; 2] = [Self::Provisioning, Self::Active];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provisioning => "provisioning",
            Self::Active => "active",
            Self::Terminated => "terminated",
        }
    }
}

/// Application Instance Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInstanceRecord {
    pub uuid: AppInstanceUuid,

    /// Nid of the application this is an instance of.
    pub nid: String,

    pub name: Option<String>,
    pub status: AppInstanceStatus,
    pub created_at: Option<Timestamp>,
}

impl AppInstanceRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        AppInstanceStatus::ACTIVE.contains(&self.status)
    }
}

/// Outstanding payment of an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrearsRecord {
    pub id: String,
    pub name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub category: Option<String>,
    pub status: Option<String>,
}
