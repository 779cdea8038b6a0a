//! Organization Data

use crate::{
    domain::organizations::records::{Address, AppInstanceRecord, OrganizationRecord},
    remote::ListParams,
};

/// New Organization Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub billing_currency: Option<String>,
    pub external_id: Option<String>,
    pub main_address: Option<Address>,

    /// Desired application nids; `None` leaves instances untouched.
    pub app_nids: Option<Vec<String>>,
}

/// Organization Update Data
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationUpdate {
    pub name: Option<String>,
    pub billing_currency: Option<String>,
    pub main_address: Option<Address>,

    /// Desired application nids; `None` leaves instances untouched while
    /// `Some(vec![])` terminates every active instance.
    pub app_nids: Option<Vec<String>>,
}

impl OrganizationUpdate {
    /// Whether any writable attribute is set.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        self.name.is_some() || self.billing_currency.is_some() || self.main_address.is_some()
    }
}

/// Extra scoping parameters forwarded to the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScope {
    pub sub_tenant_id: Option<String>,
    pub account_manager_id: Option<String>,
}

/// How the organization index was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationListRequest {
    /// Support staff looking up their own organization.
    SupportLookup { external_id: String },

    /// One query per `(attribute, value)` term, results unioned by id.
    Search {
        terms: Vec<(String, String)>,
        params: ListParams,
        scope: ListScope,
    },

    /// Plain paginated index.
    Index { params: ListParams, scope: ListScope },
}

/// A page of organizations along with the total matching count.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationPage {
    pub organizations: Vec<OrganizationRecord>,
    pub total: u64,
}

/// An organization with its dependencies and currently active instances.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationDetail {
    pub organization: OrganizationRecord,
    pub active_apps: Vec<AppInstanceRecord>,
}
