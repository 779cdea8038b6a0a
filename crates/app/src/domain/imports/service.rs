//! Import service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    auth::{Gate, RequestContext, authorize},
    domain::{
        imports::{
            data::{ImportReport, ImportRow, ImportedMember, ImportedOrganization},
            errors::ImportError,
            parse::parse_rows,
        },
        members::RemoteMembersService,
        organizations::{RemoteOrganizationsRepository, data::NewOrganization},
    },
    remote::{Query, RemoteClient},
};

/// Rows naming the same organization share it within one import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OrganizationKey {
    External(String),
    Name(String),
}

impl OrganizationKey {
    fn of(row: &ImportRow) -> Self {
        match &row.organization_external_id {
            Some(external_id) => Self::External(external_id.clone()),
            None => Self::Name(row.organization_name.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteImportService {
    organizations: RemoteOrganizationsRepository,
    members: RemoteMembersService,
}

impl RemoteImportService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            organizations: RemoteOrganizationsRepository::new(client.clone()),
            members: RemoteMembersService::new(client),
        }
    }

    async fn resolve_organization(
        &self,
        ctx: &RequestContext,
        row: &ImportRow,
    ) -> Result<ImportedOrganization, ImportError> {
        let failed = |source| ImportError::Organization {
            row: row.row,
            source,
        };

        if let Some(external_id) = &row.organization_external_id {
            let existing = self
                .organizations
                .find_by_external_id(external_id, ctx.scoped(Query::new()))
                .await
                .map_err(failed)?;

            if let Some(organization) = existing {
                return Ok(ImportedOrganization {
                    uuid: organization.uuid,
                    name: organization.name,
                    external_id: organization.external_id,
                    created: false,
                });
            }
        }

        let organization = self
            .organizations
            .create(&NewOrganization {
                name: row.organization_name.clone(),
                billing_currency: row.billing_currency.clone(),
                external_id: row.organization_external_id.clone(),
                ..NewOrganization::default()
            })
            .await
            .map_err(failed)?;

        info!(organization = %organization.uuid, row = row.row, "created organization from import");

        Ok(ImportedOrganization {
            uuid: organization.uuid,
            name: organization.name,
            external_id: organization.external_id,
            created: true,
        })
    }
}

#[async_trait]
impl ImportService for RemoteImportService {
    async fn import_csv(
        &self,
        ctx: &RequestContext,
        input: &[u8],
    ) -> Result<ImportReport, ImportError> {
        authorize(ctx, Gate::Manage)?;

        let rows = parse_rows(input)?;

        let mut report = ImportReport::default();
        let mut known: FxHashMap<OrganizationKey, usize> = FxHashMap::default();

        for row in rows {
            let key = OrganizationKey::of(&row);

            let organization = match known.get(&key).and_then(|&i| report.organizations.get(i)) {
                Some(organization) => organization.uuid,
                None => {
                    let organization = self.resolve_organization(ctx, &row).await?;
                    let uuid = organization.uuid;

                    known.insert(key, report.organizations.len());
                    report.organizations.push(organization);

                    uuid
                }
            };

            let member = self
                .members
                .invite_into(ctx, organization, row.member)
                .await
                .map_err(|source| ImportError::Member {
                    row: row.row,
                    source,
                })?;

            report.members.push(ImportedMember {
                row: row.row,
                organization,
                member,
            });
        }

        info!(
            organizations = report.organizations.len(),
            created = report.created_organizations(),
            members = report.members.len(),
            "batch import finished"
        );

        Ok(report)
    }
}

#[automock]
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Validate every row of a CSV file, then create organizations and stage
    /// member invites row by row.
    async fn import_csv(
        &self,
        ctx: &RequestContext,
        input: &[u8],
    ) -> Result<ImportReport, ImportError>;
}
