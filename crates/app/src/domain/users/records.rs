//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,

    /// Unique, case-insensitive login email.
    pub email: String,

    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,

    /// Set once the user follows their confirmation link.
    pub confirmed_at: Option<Timestamp>,

    /// When the current confirmation token was generated.
    pub confirmation_sent_at: Option<Timestamp>,

    pub created_at: Option<Timestamp>,
}

impl UserRecord {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}
