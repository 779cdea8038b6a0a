//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{
        Actor, ApiToken, AuthServiceError, IssuedApiToken, NewApiToken,
        repository::RemoteAuthRepository,
    },
    domain::users::records::UserUuid,
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct RemoteAuthService {
    repository: RemoteAuthRepository,
}

impl RemoteAuthService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteAuthRepository::new(client),
        }
    }

    /// Issue a new API token for the given admin user.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote service rejects the token.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = ApiToken::generate();

        let record = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.uuid,
                user_uuid,
                token_hash: token.verifier(user_uuid),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: token.reveal(),
            record,
        })
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let bearer: ApiToken = bearer_token
            .parse()
            .map_err(|_ignored| AuthServiceError::NotFound)?;

        let (record, actor) = self
            .repository
            .find_api_token(bearer.uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if !record.is_usable(Timestamp::now())
            || !bearer.matches(record.user_uuid, &record.token_hash)
        {
            return Err(AuthServiceError::NotFound);
        }

        let actor = actor.ok_or(AuthServiceError::NotAdmin)?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.repository.touch_last_used(bearer.uuid).await {
            debug!(%error, "failed to record api token use");
        }

        Ok(actor)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the admin it authenticates.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;
}
