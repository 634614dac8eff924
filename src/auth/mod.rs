//! Authentication module for the Ainfinit open platform.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp sources for token generation
//! - AES-ECB based `Authorization` token generation

pub mod cipher;
mod clock;
mod credentials;
mod signature;

pub use clock::{FixedClock, SystemClock, TimestampProvider};
pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{AuthToken, SignaturePayload, generate_signature};
