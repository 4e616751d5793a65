//! Credentials and the bearer token issued by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

/// Opaque bearer token issued by the backend on login.
///
/// `Debug` output is redacted so the token never reaches the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 prefix identifying the token in cache keys.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..8])
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}…)", self.fingerprint())
    }
}

/// Login form submitted by an administrator.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
