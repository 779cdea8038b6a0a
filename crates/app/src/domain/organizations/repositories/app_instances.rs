//! Application Instances Repository

use jiff::Timestamp;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::organizations::records::{
        AppInstanceRecord, AppInstanceStatus, AppInstanceUuid, OrganizationUuid,
    },
    remote::{Document, FromResource, Query, RemoteClient, RemoteError, Resource},
};

#[derive(Debug, Clone)]
pub(crate) struct RemoteAppInstancesRepository {
    client: RemoteClient,
}

impl RemoteAppInstancesRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Active instances owned by `organization`, fulfilled ones only.
    pub(crate) async fn list_active(
        &self,
        organization: OrganizationUuid,
    ) -> Result<Vec<AppInstanceRecord>, RemoteError> {
        let statuses = AppInstanceStatus::ACTIVE.map(AppInstanceStatus::as_str).join(",");

        let query = Query::new()
            .filter("owner.id", organization.to_string())
            .filter("status.in", statuses)
            .param("fulfilled_only", "true")
            .include(["app"]);

        let instances: Vec<AppInstanceRecord> = self
            .client
            .fetch("/app_instances", &query)
            .await?
            .decode_all()?;

        Ok(instances
            .into_iter()
            .filter(AppInstanceRecord::is_active)
            .collect())
    }

    pub(crate) async fn provision(
        &self,
        organization: OrganizationUuid,
        nid: &str,
    ) -> Result<(), RemoteError> {
        let body = json!({
            "data": {
                "type": "app_instances",
                "attributes": {
                    "owner_id": organization.to_string(),
                    "owner_type": "Organization",
                    "app_nid": nid,
                }
            }
        });

        self.client
            .action(Method::POST, "/app_instances/provision", Some(body))
            .await?;

        Ok(())
    }

    pub(crate) async fn terminate(&self, instance: AppInstanceUuid) -> Result<(), RemoteError> {
        self.client
            .action(
                Method::PATCH,
                &format!("/app_instances/{instance}/terminate"),
                None,
            )
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AppInstanceAttributes {
    status: AppInstanceStatus,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    app_nid: Option<String>,

    #[serde(default)]
    created_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct AppAttributes {
    nid: String,
}

impl FromResource for AppInstanceRecord {
    fn from_resource(resource: &Resource, document: &Document) -> Result<Self, RemoteError> {
        let attributes: AppInstanceAttributes = resource.attributes()?;

        let nid = match document.related_one(resource, "app") {
            Some(app) => app.attributes::<AppAttributes>()?.nid,
            None => attributes.app_nid.ok_or_else(|| {
                RemoteError::UnexpectedResponse(format!(
                    "app instance {} has no application nid",
                    resource.id
                ))
            })?,
        };

        Ok(Self {
            uuid: resource.uuid()?,
            nid,
            name: attributes.name,
            status: attributes.status,
            created_at: attributes.created_at,
        })
    }
}
