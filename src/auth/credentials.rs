//! Merchant credentials and where the client gets them from.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::auth::signature::generate_signature;
use crate::error::AinfinitError;

/// Environment variable holding the merchant code.
pub const MERCHANT_CODE_VAR: &str = "AINFINIT_MERCHANT_CODE";
/// Environment variable holding the AES secret key.
pub const SECRET_KEY_VAR: &str = "AINFINIT_SECRET_KEY";

/// A merchant code and the AES key the platform issued with it.
#[derive(Clone)]
pub struct Credentials {
    pub merchant_code: String,
    /// 16, 24 or 32 characters; only read when a token is signed.
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from a merchant code and secret key.
    pub fn new(merchant_code: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            merchant_code: merchant_code.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// The raw secret key.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Build the `Authorization` token for the given timestamp.
    pub fn signature(&self, timestamp_ms: i64) -> Result<String, AinfinitError> {
        generate_signature(
            &self.merchant_code,
            self.secret_key.expose_secret().as_bytes(),
            timestamp_ms,
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_code", &self.merchant_code)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Source of the merchant credentials used to sign each request.
pub trait CredentialsProvider: Send + Sync {
    fn get_credentials(&self) -> &Credentials;
}

/// Credentials fixed at construction.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(merchant_code: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(merchant_code, secret_key),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Arc<T> {
    fn get_credentials(&self) -> &Credentials {
        (**self).get_credentials()
    }
}

/// Merchant credentials taken from `AINFINIT_MERCHANT_CODE` and
/// `AINFINIT_SECRET_KEY`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read the merchant code and secret key from the environment.
    ///
    /// # Panics
    ///
    /// Panics if either variable is unset.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Some(provider) => provider,
            None => panic!("{MERCHANT_CODE_VAR} and {SECRET_KEY_VAR} must both be set"),
        }
    }

    /// Like [`EnvCredentials::from_env`], but `None` when either variable is unset.
    pub fn try_from_env() -> Option<Self> {
        let merchant_code = std::env::var(MERCHANT_CODE_VAR).ok()?;
        let secret_key = std::env::var(SECRET_KEY_VAR).ok()?;

        Some(Self {
            credentials: Credentials::new(merchant_code, secret_key),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
