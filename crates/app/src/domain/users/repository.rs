//! Users Repository

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
    },
    remote::{Document, FromResource, Page, Query, RemoteClient, RemoteError, Resource},
};

#[derive(Debug, Clone)]
/// Users stored on the remote resource service.
pub(crate) struct RemoteUsersRepository {
    client: RemoteClient,
}

impl RemoteUsersRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, RemoteError> {
        let query = Query::new().filter("email", email).page(Page::SINGLE);

        let document = self.client.fetch("/users", &query).await?;

        document
            .resources()
            .first()
            .map(|resource| UserRecord::from_resource(resource, &document))
            .transpose()
    }

    pub(crate) async fn create_user(&self, user: &NewUser) -> Result<UserRecord, RemoteError> {
        let attributes = json!({
            "email": user.email,
            "name": user.name,
            "surname": user.surname,
            "phone": user.phone,
            "password": user.password.expose(),
            "skip_confirmation_notification": true,
        });

        self.client
            .create("/users", "users", attributes)
            .await?
            .decode_one()
    }

    /// Reset the confirmation token so a later invite can regenerate it.
    pub(crate) async fn clear_confirmation(&self, user: UserUuid) -> Result<(), RemoteError> {
        let id = user.to_string();

        self.client
            .update(
                &format!("/users/{id}"),
                "users",
                &id,
                json!({ "confirmation_token": null, "confirmation_sent_at": null }),
            )
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UserAttributes {
    email: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    surname: Option<String>,

    #[serde(default)]
    phone: Option<String>,

    #[serde(default)]
    confirmed_at: Option<Timestamp>,

    #[serde(default)]
    confirmation_sent_at: Option<Timestamp>,

    #[serde(default)]
    created_at: Option<Timestamp>,
}

impl FromResource for UserRecord {
    fn from_resource(resource: &Resource, _document: &Document) -> Result<Self, RemoteError> {
        let attributes: UserAttributes = resource.attributes()?;

        Ok(Self {
            uuid: resource.uuid()?,
            email: attributes.email,
            name: attributes.name,
            surname: attributes.surname,
            phone: attributes.phone,
            confirmed_at: attributes.confirmed_at,
            confirmation_sent_at: attributes.confirmation_sent_at,
            created_at: attributes.created_at,
        })
    }
}
