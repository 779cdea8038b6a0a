//! Random initial passwords.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

const FRIENDLY_TOKEN_BYTES: usize = 15;

/// A URL-safe random token without easily confused characters.
///
/// Used as the throwaway password of users created on invitation; nobody ever
/// learns it, they set their own when accepting the invite.
pub struct FriendlyToken(String);

impl FriendlyToken {
    /// Generate a fresh 20 character token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; FRIENDLY_TOKEN_BYTES];

        OsRng.fill_bytes(&mut bytes);

        let token = URL_SAFE_NO_PAD
            .encode(bytes)
            .chars()
            .map(|c| match c {
                'l' => 's',
                'I' => 'x',
                'O' => 'y',
                '0' => 'z',
                other => other,
            })
            .collect();

        bytes.zeroize();

        Self(token)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FriendlyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FriendlyToken(**redacted**)")
    }
}

impl Drop for FriendlyToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
