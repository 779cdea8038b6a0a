//! Acting admin and per-request context.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{organizations::records::OrganizationUuid, users::records::UserUuid},
    remote::Query,
};

/// Back-office role of an admin user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    Staff,
    Support,
}

/// Organization a support user is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportOrganization {
    pub uuid: Option<OrganizationUuid>,
    pub external_id: Option<String>,
}

/// The authenticated back-office user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub uuid: UserUuid,
    pub email: String,
    pub admin_role: AdminRole,
    pub support_organization: Option<SupportOrganization>,
}

impl Actor {
    #[must_use]
    pub fn is_support(&self) -> bool {
        self.admin_role == AdminRole::Support
    }
}

/// Who is acting, and under which panel settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub actor: Actor,

    /// Whether the admin panel lets support users in at all.
    pub support_enabled: bool,
}

impl RequestContext {
    #[must_use]
    pub fn new(actor: Actor, support_enabled: bool) -> Self {
        Self {
            actor,
            support_enabled,
        }
    }

    /// Full admin context for offline tools acting on behalf of `user`.
    #[must_use]
    pub fn operator(user: UserUuid) -> Self {
        Self::new(
            Actor {
                uuid: user,
                email: String::new(),
                admin_role: AdminRole::Admin,
                support_organization: None,
            },
            false,
        )
    }

    /// Scope a remote query to what the acting manager may see.
    #[must_use]
    pub fn scoped(&self, query: Query) -> Query {
        query.metadata("act_as_manager", self.actor.uuid.to_string())
    }
}
