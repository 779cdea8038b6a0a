//! Organizations service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::info;

use crate::{
    auth::{Gate, RequestContext, authorize},
    domain::organizations::{
        data::{
            ListScope, NewOrganization, OrganizationDetail, OrganizationListRequest,
            OrganizationPage, OrganizationUpdate,
        },
        errors::OrganizationsServiceError,
        reconcile::plan_app_list,
        records::{AppInstanceRecord, ArrearsRecord, OrganizationRecord, OrganizationUuid},
        repositories::{RemoteAppInstancesRepository, RemoteOrganizationsRepository},
    },
    remote::{ListParams, Query, RemoteClient, RemoteError},
};

#[derive(Debug, Clone)]
pub struct RemoteOrganizationsService {
    organizations: RemoteOrganizationsRepository,
    app_instances: RemoteAppInstancesRepository,
}

impl RemoteOrganizationsService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            organizations: RemoteOrganizationsRepository::new(client.clone()),
            app_instances: RemoteAppInstancesRepository::new(client),
        }
    }

    /// Make the active instances of `organization` match `desired`.
    ///
    /// Terminations run before provisioning. The first failure aborts the
    /// remaining steps; completed steps are not rolled back.
    async fn update_app_list(
        &self,
        organization: OrganizationUuid,
        desired: &[String],
        existing: &[AppInstanceRecord],
    ) -> Result<(), OrganizationsServiceError> {
        let plan = plan_app_list(desired, existing);

        if plan.is_noop() {
            return Ok(());
        }

        info!(
            %organization,
            terminate = plan.terminate.len(),
            provision = ?plan.provision,
            "reconciling application list"
        );

        for instance in &plan.terminate {
            self.app_instances.terminate(*instance).await?;
        }

        for nid in &plan.provision {
            self.app_instances.provision(organization, nid).await?;
        }

        Ok(())
    }

    async fn find(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationRecord, OrganizationsServiceError> {
        self.organizations
            .find(organization, ctx.scoped(Query::new()))
            .await
            .map_err(|error| match error {
                RemoteError::NotFound => OrganizationsServiceError::NotFound,
                other => other.into(),
            })
    }

    /// Reload an organization and its active instances for the show view.
    async fn detail(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        let organization = self.find(ctx, organization).await?;
        let active_apps = organization.active_app_instances().cloned().collect();

        Ok(OrganizationDetail {
            organization,
            active_apps,
        })
    }
}

fn index_query(ctx: &RequestContext, params: &ListParams, scope: &ListScope) -> Query {
    let mut query = ctx.scoped(params.apply(Query::new()));

    if let Some(sub_tenant_id) = &scope.sub_tenant_id {
        query = query.param("sub_tenant_id", sub_tenant_id);
    }

    if let Some(account_manager_id) = &scope.account_manager_id {
        query = query.param("account_manager_id", account_manager_id);
    }

    query
}

fn count<T>(items: &[T]) -> u64 {
    u64::try_from(items.len()).unwrap_or(u64::MAX)
}

#[async_trait]
impl OrganizationsService for RemoteOrganizationsService {
    async fn list_organizations(
        &self,
        ctx: &RequestContext,
        request: OrganizationListRequest,
    ) -> Result<OrganizationPage, OrganizationsServiceError> {
        match request {
            OrganizationListRequest::SupportLookup { external_id } => {
                authorize(ctx, Gate::SupportLookup {
                    external_id: &external_id,
                })?;

                let query = Query::new().filter("external_id", external_id);
                let (organizations, _) = self.organizations.list(query).await?;
                let total = count(&organizations);

                Ok(OrganizationPage {
                    organizations,
                    total,
                })
            }
            OrganizationListRequest::Search {
                terms,
                params,
                scope,
            } => {
                authorize(ctx, Gate::ListOrganizations)?;

                let mut seen = FxHashSet::default();
                let mut organizations = Vec::new();

                for (key, value) in terms {
                    let query = index_query(ctx, &params, &scope).filter(key, value);
                    let (page, _) = self.organizations.list(query).await?;

                    organizations.extend(
                        page.into_iter()
                            .filter(|organization| seen.insert(organization.uuid)),
                    );
                }

                let total = count(&organizations);

                Ok(OrganizationPage {
                    organizations,
                    total,
                })
            }
            OrganizationListRequest::Index { params, scope } => {
                authorize(ctx, Gate::ListOrganizations)?;

                let query = index_query(ctx, &params, &scope);
                let (organizations, record_count) = self.organizations.list(query).await?;
                let total = record_count.unwrap_or_else(|| count(&organizations));

                Ok(OrganizationPage {
                    organizations,
                    total,
                })
            }
        }
    }

    async fn get_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        authorize(ctx, Gate::ReadOrganization(organization))?;

        let organization = self.find(ctx, organization).await?;
        let active_apps = self.app_instances.list_active(organization.uuid).await?;

        Ok(OrganizationDetail {
            organization,
            active_apps,
        })
    }

    async fn count_organizations(
        &self,
        ctx: &RequestContext,
    ) -> Result<u64, OrganizationsServiceError> {
        authorize(ctx, Gate::ListOrganizations)?;

        Ok(self
            .organizations
            .organizations_count(ctx.scoped(Query::new()))
            .await?)
    }

    async fn list_arrears(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ArrearsRecord>, OrganizationsServiceError> {
        authorize(ctx, Gate::ListOrganizations)?;

        Ok(self.organizations.arrears().await?)
    }

    async fn create_organization(
        &self,
        ctx: &RequestContext,
        organization: NewOrganization,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        authorize(ctx, Gate::Manage)?;

        let created = self.organizations.create(&organization).await?;

        info!(organization = %created.uuid, name = %created.name, "created organization");

        if let Some(desired) = &organization.app_nids {
            let existing: Vec<_> = created.active_app_instances().cloned().collect();

            self.update_app_list(created.uuid, desired, &existing).await?;
        }

        let organization = self.find(ctx, created.uuid).await?;
        let active_apps = organization.app_instances.clone();

        Ok(OrganizationDetail {
            organization,
            active_apps,
        })
    }

    async fn update_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        update: OrganizationUpdate,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        authorize(ctx, Gate::Manage)?;

        let existing = self.find(ctx, organization).await?;

        if let Some(desired) = &update.app_nids {
            let active: Vec<_> = existing.active_app_instances().cloned().collect();

            self.update_app_list(existing.uuid, desired, &active).await?;
        }

        if update.has_attributes() {
            self.organizations.update(existing.uuid, &update).await?;
        }

        self.detail(ctx, existing.uuid).await
    }

    async fn freeze_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        authorize(ctx, Gate::Manage)?;

        let existing = self.find(ctx, organization).await?;

        self.organizations.freeze(existing.uuid).await?;

        info!(organization = %existing.uuid, "froze organization account");

        self.detail(ctx, existing.uuid).await
    }

    async fn unfreeze_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError> {
        authorize(ctx, Gate::Manage)?;

        let existing = self.find(ctx, organization).await?;

        self.organizations.unfreeze(existing.uuid).await?;

        info!(organization = %existing.uuid, "unfroze organization account");

        self.detail(ctx, existing.uuid).await
    }
}

#[automock]
#[async_trait]
pub trait OrganizationsService: Send + Sync {
    /// List organizations in one of the index modes.
    async fn list_organizations(
        &self,
        ctx: &RequestContext,
        request: OrganizationListRequest,
    ) -> Result<OrganizationPage, OrganizationsServiceError>;

    /// Organization with dependencies and its fulfilled active instances.
    async fn get_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError>;

    async fn count_organizations(
        &self,
        ctx: &RequestContext,
    ) -> Result<u64, OrganizationsServiceError>;

    async fn list_arrears(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ArrearsRecord>, OrganizationsServiceError>;

    /// Create an organization, then provision its requested applications.
    async fn create_organization(
        &self,
        ctx: &RequestContext,
        organization: NewOrganization,
    ) -> Result<OrganizationDetail, OrganizationsServiceError>;

    /// Reconcile the application list, then update attributes.
    async fn update_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        update: OrganizationUpdate,
    ) -> Result<OrganizationDetail, OrganizationsServiceError>;

    async fn freeze_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError>;

    async fn unfreeze_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationDetail, OrganizationsServiceError>;
}
