//! Dashboard login and the signed session cookie.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::entities::{AccessToken, Credentials};
use crate::domain::repositories::AuthRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Seals the backend token into a tamper-evident cookie value.
///
/// Format: `base64url(token).hex(hmac_sha256(secret, base64url(token)))`.
/// The token itself is not encrypted; the MAC only stops clients from
/// swapping in values the dashboard did not issue.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
}

impl SessionSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    pub fn seal(&self, token: &AccessToken) -> String {
        let payload = URL_SAFE_NO_PAD.encode(token.as_str());
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        format!("{payload}.{}", hex::encode(mac.finalize().into_bytes()))
    }

    /// Verifies a sealed value, returning the token if the signature matches.
    pub fn open(&self, sealed: &str) -> Option<AccessToken> {
        let (payload, signature) = sealed.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let raw = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let token = String::from_utf8(raw).ok()?;
        (!token.is_empty()).then(|| AccessToken::new(token))
    }
}

/// Logs administrators in against the backend and manages their session.
pub struct AuthService<R: AuthRepository + ?Sized> {
    repository: Arc<R>,
    signer: SessionSigner,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repository: Arc<R>, signer: SessionSigner) -> Self {
        Self { repository, signer }
    }

    /// Exchanges credentials for a backend token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed input and
    /// [`AppError::Unauthorized`] when the backend rejects the credentials.
    pub async fn login(&self, mut credentials: Credentials) -> Result<AccessToken, AppError> {
        credentials.email = credentials.email.trim().to_lowercase();
        credentials.validate()?;

        let email = credentials.email.clone();
        match self.repository.login(credentials).await {
            Ok(token) => {
                info!(%email, "Administrator logged in");
                Ok(token)
            }
            Err(e) if e.is_unauthorized() => {
                warn!(%email, "Login rejected by backend");
                Err(AppError::unauthorized(
                    "Invalid email or password",
                    json!({ "email": email }),
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Revokes the token on the backend. An already expired token is not an error.
    pub async fn logout(&self, token: &AccessToken) -> Result<(), AppError> {
        match self.repository.logout(token).await {
            Err(e) if e.is_unauthorized() => Ok(()),
            other => other,
        }
    }

    pub fn seal(&self, token: &AccessToken) -> String {
        self.signer.seal(token)
    }

    pub fn open(&self, sealed: &str) -> Option<AccessToken> {
        self.signer.open(sealed)
    }
}
