use std::sync::Arc;

use thiserror::Error;

use super::IdentityCache;
use crate::domain::{models::ApplicationIdentity, ports::outbound::CredentialStore, UserInfoError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing application id")]
    MissingToken,
    #[error("Unknown application id")]
    UnknownApplication,
    #[error(transparent)]
    Backend(#[from] UserInfoError),
}

impl From<AuthError> for UserInfoError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Backend(inner) => inner,
            other => UserInfoError::unauthenticated(other.to_string()),
        }
    }
}

/// Resolves caller tokens to application identities, consulting the
/// credential table only when the cache has no usable entry.
#[derive(Clone)]
pub struct ApplicationAuthenticator {
    credentials: Arc<dyn CredentialStore>,
    cache: Arc<dyn IdentityCache>,
}

impl ApplicationAuthenticator {
    pub fn new(credentials: Arc<dyn CredentialStore>, cache: Arc<dyn IdentityCache>) -> Self {
        Self { credentials, cache }
    }

    #[tracing::instrument(name = "ApplicationAuthenticator::authenticate", skip_all)]
    pub async fn authenticate(&self, token: Option<&str>) -> Result<ApplicationIdentity, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        if let Some(identity) = self.cache.get(token).filter(ApplicationIdentity::is_complete) {
            return Ok(identity);
        }

        let identity = self
            .credentials
            .find_latest_by_token(token)
            .await?
            .filter(ApplicationIdentity::is_complete)
            .ok_or(AuthError::UnknownApplication)?;

        tracing::debug!(application = %identity.name, "resolved application identity");
        self.cache.insert(token, identity.clone());
        Ok(identity)
    }
}
