//! Auth repository.

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{
        Actor, AdminRole, ApiTokenRecord, ApiTokenUuid, NewApiToken, SupportOrganization,
        TOKEN_VERSION,
    },
    remote::{Document, FromResource, Query, RemoteClient, RemoteError, Resource},
};

#[derive(Debug, Clone)]
pub(crate) struct RemoteAuthRepository {
    client: RemoteClient,
}

impl RemoteAuthRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Load a token with the admin it belongs to.
    ///
    /// The actor is `None` when the owning user has no back-office role.
    pub(crate) async fn find_api_token(
        &self,
        token: ApiTokenUuid,
    ) -> Result<Option<(ApiTokenRecord, Option<Actor>)>, RemoteError> {
        let query = Query::new().include(["user"]);

        let document = match self.client.fetch(&format!("/api_tokens/{token}"), &query).await {
            Ok(document) => document,
            Err(RemoteError::NotFound) => return Ok(None),
            Err(error) => return Err(error),
        };

        let Some(resource) = document.resources().first() else {
            return Ok(None);
        };

        let record = ApiTokenRecord::from_resource(resource, &document)?;

        let actor = document
            .related_one(resource, "user")
            .map(actor_from_user)
            .transpose()?
            .flatten();

        Ok(Some((record, actor)))
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenRecord, RemoteError> {
        let attributes = json!({
            "id": token.uuid.to_string(),
            "user_id": token.user_uuid.to_string(),
            "version": TOKEN_VERSION,
            "token_hash": token.token_hash,
            "expires_at": token.expires_at,
        });

        self.client
            .create("/api_tokens", "api_tokens", attributes)
            .await?
            .decode_one()
    }

    pub(crate) async fn touch_last_used(&self, token: ApiTokenUuid) -> Result<(), RemoteError> {
        let id = token.to_string();

        self.client
            .update(
                &format!("/api_tokens/{id}"),
                "api_tokens",
                &id,
                json!({ "last_used_at": Timestamp::now() }),
            )
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiTokenAttributes {
    user_id: String,
    version: i16,
    token_hash: String,

    #[serde(default)]
    expires_at: Option<Timestamp>,

    #[serde(default)]
    revoked_at: Option<Timestamp>,
}

impl FromResource for ApiTokenRecord {
    fn from_resource(resource: &Resource, _document: &Document) -> Result<Self, RemoteError> {
        let attributes: ApiTokenAttributes = resource.attributes()?;

        if attributes.version != TOKEN_VERSION {
            return Err(RemoteError::UnexpectedResponse(format!(
                "api token {} has unsupported version {}",
                resource.id, attributes.version
            )));
        }

        Ok(Self {
            uuid: resource.uuid()?,
            user_uuid: attributes
                .user_id
                .parse()
                .map_err(|_err| RemoteError::InvalidIdentifier(attributes.user_id.clone()))?,
            token_hash: attributes.token_hash,
            expires_at: attributes.expires_at,
            revoked_at: attributes.revoked_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AdminUserAttributes {
    email: String,

    #[serde(default)]
    admin_role: Option<AdminRole>,

    #[serde(default)]
    support_org_id: Option<String>,

    #[serde(default)]
    support_org_external_id: Option<String>,
}

fn actor_from_user(user: &Resource) -> Result<Option<Actor>, RemoteError> {
    let attributes: AdminUserAttributes = user.attributes()?;

    let Some(admin_role) = attributes.admin_role else {
        return Ok(None);
    };

    let support_organization = if admin_role == AdminRole::Support {
        let uuid = attributes
            .support_org_id
            .map(|id| {
                id.parse()
                    .map_err(|_err| RemoteError::InvalidIdentifier(id.clone()))
            })
            .transpose()?;

        Some(SupportOrganization {
            uuid,
            external_id: attributes.support_org_external_id,
        })
    } else {
        None
    };

    Ok(Some(Actor {
        uuid: user.uuid()?,
        email: attributes.email,
        admin_role,
        support_organization,
    }))
}
