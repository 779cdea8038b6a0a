//! Import Data

use crate::domain::{
    members::data::{InvitedMember, NewMember},
    organizations::records::OrganizationUuid,
};

/// A validated CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based data row number; the header is not counted.
    pub row: usize,
    pub organization_name: String,
    pub organization_external_id: Option<String>,
    pub billing_currency: Option<String>,
    pub member: NewMember,
}

/// An organization touched by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedOrganization {
    pub uuid: OrganizationUuid,
    pub name: String,
    pub external_id: Option<String>,

    /// `false` when an existing organization was reused.
    pub created: bool,
}

/// Outcome of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMember {
    pub row: usize,
    pub organization: OrganizationUuid,
    pub member: InvitedMember,
}

/// Import Report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Organizations in order of first appearance.
    pub organizations: Vec<ImportedOrganization>,
    pub members: Vec<ImportedMember>,
}

impl ImportReport {
    #[must_use]
    pub fn created_organizations(&self) -> usize {
        self.organizations.iter().filter(|org| org.created).count()
    }
}
