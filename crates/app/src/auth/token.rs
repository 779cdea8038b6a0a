//! Bearer tokens of the form `bo_v1_<token id>.<secret hex>`.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{auth::ApiTokenUuid, domain::users::records::UserUuid};

/// Token format version, stored next to the verifier hash.
pub const TOKEN_VERSION: i16 = 1;

const TOKEN_PREFIX: &str = "bo_v1_";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token is malformed")]
    Malformed,

    #[error("api token secret is not 32 bytes of hex")]
    Secret,
}

/// A raw token as held by its bearer.
#[derive(Clone)]
pub struct ApiToken {
    pub uuid: ApiTokenUuid,
    secret: Zeroizing<[u8; SECRET_BYTES]>,
}

impl ApiToken {
    /// A fresh token with a random secret.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = Zeroizing::new([0_u8; SECRET_BYTES]);

        OsRng.fill_bytes(secret.as_mut_slice());

        Self {
            uuid: ApiTokenUuid::new(),
            secret,
        }
    }

    /// The string handed to the bearer. Only shown once, at issue time.
    #[must_use]
    pub fn reveal(&self) -> String {
        format!(
            "{TOKEN_PREFIX}{}.{}",
            self.uuid.into_uuid().simple(),
            hex::encode(self.secret.as_slice())
        )
    }

    /// Lowercase SHA-256 hex binding this token to `user`.
    ///
    /// Hashes `{token id}:{version}:{user id}:{secret hex}`.
    #[must_use]
    pub fn verifier(&self, user: UserUuid) -> String {
        let input = Zeroizing::new(format!(
            "{}:{TOKEN_VERSION}:{}:{}",
            self.uuid.into_uuid().simple(),
            user.into_uuid().simple(),
            hex::encode(self.secret.as_slice())
        ));

        hex::encode(Sha256::digest(input.as_bytes()))
    }

    /// Compare against a stored verifier without short-circuiting.
    #[must_use]
    pub fn matches(&self, user: UserUuid, stored: &str) -> bool {
        let computed = self.verifier(user);

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("uuid", &self.uuid)
            .field("secret", &"**redacted**")
            .finish()
    }
}

impl FromStr for ApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret) = token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|rest| rest.split_once('.'))
            .ok_or(ApiTokenError::Malformed)?;

        let uuid = Uuid::try_parse(id).map_err(|_ignored| ApiTokenError::Malformed)?;

        let mut bytes = Zeroizing::new([0_u8; SECRET_BYTES]);

        hex::decode_to_slice(secret, bytes.as_mut_slice())
            .map_err(|_ignored| ApiTokenError::Secret)?;

        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(uuid),
            secret: bytes,
        })
    }
}
