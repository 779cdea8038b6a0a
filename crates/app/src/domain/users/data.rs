//! User Data

use crate::domain::users::password::FriendlyToken;

/// New User Data
///
/// Created unconfirmed with a random password; the confirmation notification
/// is always suppressed.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub password: FriendlyToken,
}
