//! Authorization gate.

use thiserror::Error;

use crate::{auth::RequestContext, domain::organizations::records::OrganizationUuid};

/// An action the acting admin wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate<'a> {
    /// Organization index filtered on an external id (support only).
    SupportLookup { external_id: &'a str },

    /// Unfiltered organization index, search or reporting.
    ListOrganizations,

    ReadOrganization(OrganizationUuid),

    /// Subscription events of the given organization.
    ReadSubscriptionEvents(OrganizationUuid),

    /// Any write.
    Manage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("action not permitted")]
pub struct Forbidden;

/// Decide whether the acting admin may pass `gate`.
///
/// Admin and staff pass every gate except the support lookup. Support users
/// only get read access to their own organization, and only while support
/// is enabled.
pub fn authorize(ctx: &RequestContext, gate: Gate<'_>) -> Result<(), Forbidden> {
    let actor = &ctx.actor;

    if !actor.is_support() {
        return match gate {
            Gate::SupportLookup { .. } => Err(Forbidden),
            _ => Ok(()),
        };
    }

    if !ctx.support_enabled {
        return Err(Forbidden);
    }

    let Some(organization) = &actor.support_organization else {
        return Err(Forbidden);
    };

    let allowed = match gate {
        Gate::SupportLookup { external_id } => {
            organization.external_id.as_deref() == Some(external_id)
        }
        Gate::ReadOrganization(uuid) | Gate::ReadSubscriptionEvents(uuid) => {
            organization.uuid == Some(uuid)
        }
        Gate::ListOrganizations | Gate::Manage => false,
    };

    if allowed { Ok(()) } else { Err(Forbidden) }
}
