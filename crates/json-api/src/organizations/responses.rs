//! Organization responses.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use backoffice_app::domain::{
    imports::{ImportRowError, data::{ImportReport, ImportedMember}},
    invites::records::OrgaInviteRecord,
    members::data::{InvitedMember, MemberEntry, member_entries},
    organizations::{
        data::OrganizationDetail,
        records::{Address, AppInstanceRecord, ArrearsRecord, OrganizationRecord},
    },
    users::records::UserRecord,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        AddressResponse {
            street: address.street,
            city: address.city,
            state_code: address.state_code,
            postal_code: address.postal_code,
            country_code: address.country_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppInstanceResponse {
    pub id: Uuid,

    /// Nid of the application
    pub nid: String,

    pub name: Option<String>,

    /// `provisioning`, `active` or `terminated`
    pub status: String,

    pub created_at: Option<String>,
}

impl From<AppInstanceRecord> for AppInstanceResponse {
    fn from(instance: AppInstanceRecord) -> Self {
        AppInstanceResponse {
            id: instance.uuid.into(),
            nid: instance.nid,
            name: instance.name,
            status: instance.status.as_str().to_owned(),
            created_at: instance.created_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Whether a member row is a user or an outstanding invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) enum MemberEntity {
    User,
    Invite,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberResponse {
    pub entity: MemberEntity,
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,

    /// Role within the organization, when known
    pub role: Option<String>,

    /// `confirmed`/`unconfirmed` for users, the invite status otherwise
    pub status: String,
}

impl MemberResponse {
    fn user(user: UserRecord, role: Option<String>) -> Self {
        MemberResponse {
            entity: MemberEntity::User,
            id: user.uuid.into(),
            status: if user.is_confirmed() {
                "confirmed"
            } else {
                "unconfirmed"
            }
            .to_owned(),
            email: user.email,
            name: user.name,
            surname: user.surname,
            role,
        }
    }

    fn invite(invite: OrgaInviteRecord) -> Self {
        MemberResponse {
            entity: MemberEntity::Invite,
            id: invite.uuid.into(),
            email: invite.user_email,
            name: None,
            surname: None,
            role: Some(invite.role.as_str().to_owned()),
            status: invite.status.as_str().to_owned(),
        }
    }
}

impl From<MemberEntry> for MemberResponse {
    fn from(entry: MemberEntry) -> Self {
        match entry {
            MemberEntry::User(member) => {
                MemberResponse::user(member.user, Some(member.role.as_str().to_owned()))
            }
            MemberEntry::Invite(invite) => MemberResponse::invite(invite),
        }
    }
}

impl From<InvitedMember> for MemberResponse {
    fn from(member: InvitedMember) -> Self {
        match member {
            InvitedMember::User(user) => MemberResponse::user(user, None),
            InvitedMember::Invitation(invite) => MemberResponse::invite(invite),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MembersResponse {
    pub members: Vec<MemberResponse>,
}

impl From<Vec<MemberEntry>> for MembersResponse {
    fn from(entries: Vec<MemberEntry>) -> Self {
        MembersResponse {
            members: entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Invited Member Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvitedMemberResponse {
    pub user: MemberResponse,
}

/// Organization as listed by the index.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationSummaryResponse {
    pub id: Uuid,
    pub uid: Option<String>,
    pub name: String,
    pub external_id: Option<String>,
    pub account_frozen: bool,
    pub soa_enabled: bool,
    pub demo_account: bool,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub financial_year_end_month: Option<u8>,
    pub geo_country_code: Option<String>,
    pub geo_state_code: Option<String>,
    pub geo_city: Option<String>,
    pub geo_tz: Option<String>,
    pub geo_currency: Option<String>,
    pub created_at: Option<String>,
}

impl From<OrganizationRecord> for OrganizationSummaryResponse {
    fn from(organization: OrganizationRecord) -> Self {
        OrganizationSummaryResponse {
            id: organization.uuid.into(),
            uid: organization.uid,
            name: organization.name,
            external_id: organization.external_id,
            account_frozen: organization.account_frozen,
            soa_enabled: organization.soa_enabled,
            demo_account: organization.demo_account,
            industry: organization.industry,
            size: organization.size,
            financial_year_end_month: organization.financial_year_end_month,
            geo_country_code: organization.geo.country,
            geo_state_code: organization.geo.state,
            geo_city: organization.geo.city,
            geo_tz: organization.geo.tz,
            geo_currency: organization.geo.currency,
            created_at: organization.created_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationsResponse {
    pub organizations: Vec<OrganizationSummaryResponse>,
}

/// Organization with its dependencies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationResponse {
    pub id: Uuid,
    pub uid: Option<String>,
    pub name: String,
    pub external_id: Option<String>,
    pub billing_currency: Option<String>,
    pub account_frozen: bool,
    pub soa_enabled: bool,
    pub demo_account: bool,
    pub main_address: Option<AddressResponse>,
    pub created_at: Option<String>,

    /// Instances of every status
    pub app_instances: Vec<AppInstanceResponse>,

    /// Users followed by outstanding invites
    pub members: Vec<MemberResponse>,
}

impl From<OrganizationRecord> for OrganizationResponse {
    fn from(organization: OrganizationRecord) -> Self {
        let members = member_entries(&organization)
            .into_iter()
            .map(Into::into)
            .collect();

        OrganizationResponse {
            id: organization.uuid.into(),
            uid: organization.uid,
            name: organization.name,
            external_id: organization.external_id,
            billing_currency: organization.billing_currency,
            account_frozen: organization.account_frozen,
            soa_enabled: organization.soa_enabled,
            demo_account: organization.demo_account,
            main_address: organization.main_address.map(Into::into),
            created_at: organization.created_at.as_ref().map(ToString::to_string),
            app_instances: organization
                .app_instances
                .into_iter()
                .map(Into::into)
                .collect(),
            members,
        }
    }
}

/// Organization Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationDetailResponse {
    pub organization: OrganizationResponse,
    pub active_apps: Vec<AppInstanceResponse>,
}

impl From<OrganizationDetail> for OrganizationDetailResponse {
    fn from(detail: OrganizationDetail) -> Self {
        OrganizationDetailResponse {
            organization: detail.organization.into(),
            active_apps: detail.active_apps.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ArrearsResponse {
    pub id: String,
    pub name: String,

    /// Amount owed in cents
    pub amount_cents: i64,

    pub currency: String,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl From<ArrearsRecord> for ArrearsResponse {
    fn from(arrears: ArrearsRecord) -> Self {
        ArrearsResponse {
            id: arrears.id,
            name: arrears.name,
            amount_cents: arrears.amount_cents,
            currency: arrears.currency,
            category: arrears.category,
            status: arrears.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InArrearsResponse {
    pub in_arrears: Vec<ArrearsResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportedOrganizationResponse {
    pub id: Uuid,
    pub name: String,
    pub external_id: Option<String>,

    /// `false` when an existing organization was reused
    pub created: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportedMemberResponse {
    /// 1-based data row
    pub row: usize,
    pub organization_id: Uuid,
    pub user: MemberResponse,
}

impl From<ImportedMember> for ImportedMemberResponse {
    fn from(imported: ImportedMember) -> Self {
        ImportedMemberResponse {
            row: imported.row,
            organization_id: imported.organization.into(),
            user: imported.member.into(),
        }
    }
}

/// Import Report Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportReportResponse {
    pub organizations: Vec<ImportedOrganizationResponse>,
    pub members: Vec<ImportedMemberResponse>,
}

impl From<ImportReport> for ImportReportResponse {
    fn from(report: ImportReport) -> Self {
        ImportReportResponse {
            organizations: report
                .organizations
                .into_iter()
                .map(|organization| ImportedOrganizationResponse {
                    id: organization.uuid.into(),
                    name: organization.name,
                    external_id: organization.external_id,
                    created: organization.created,
                })
                .collect(),
            members: report.members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportRowErrorResponse {
    /// 1-based data row, `0` for the header
    pub row: usize,
    pub field: Option<String>,
    pub message: String,
}

impl From<ImportRowError> for ImportRowErrorResponse {
    fn from(error: ImportRowError) -> Self {
        ImportRowErrorResponse {
            row: error.row,
            field: error.field,
            message: error.message,
        }
    }
}
