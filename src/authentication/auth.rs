//! Credential handling contract.
//!
//! Token issuing and password hashing are not built yet. The contract is
//! fixed here so callers can be written against it; `PendingCredentials`
//! is the only backend and reports every capability as absent.

use chrono::TimeDelta;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Token payload, free-form until a claim set is settled on.
pub type Claims = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AccessTokens,
    TokenVerification,
    PasswordHashing,
    PasswordVerification,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::AccessTokens => "JWT access token issuing",
            Capability::TokenVerification => "JWT verification",
            Capability::PasswordHashing => "Password hashing",
            Capability::PasswordVerification => "Password verification",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Absent capability. Retrying will not help.
    #[error("{0} is not implemented yet")]
    NotImplemented(Capability),
}

pub trait CredentialService: Send + Sync {
    fn create_access_token(
        &self,
        claims: &Claims,
        expires_in: Option<TimeDelta>,
    ) -> Result<String, AuthError>;

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;

    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PendingCredentials;

impl CredentialService for PendingCredentials {
    fn create_access_token(
        &self,
        _claims: &Claims,
        _expires_in: Option<TimeDelta>,
    ) -> Result<String, AuthError> {
        Err(AuthError::NotImplemented(Capability::AccessTokens))
    }

    fn verify_token(&self, _token: &str) -> Result<Claims, AuthError> {
        Err(AuthError::NotImplemented(Capability::TokenVerification))
    }

    fn hash_password(&self, _password: &str) -> Result<String, AuthError> {
        Err(AuthError::NotImplemented(Capability::PasswordHashing))
    }

    fn verify_password(&self, _password: &str, _password_hash: &str) -> Result<bool, AuthError> {
        Err(AuthError::NotImplemented(Capability::PasswordVerification))
    }
}
