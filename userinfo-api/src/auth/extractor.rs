use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{app_state::AppState, domain::models::ApplicationIdentity, routes::ApiError};

/// The calling application, resolved from the configured token header.
/// Rejects with 401 when the header is missing, blank or unknown.
#[derive(Debug, Clone)]
pub struct AuthApplication(pub ApplicationIdentity);

impl Deref for AuthApplication {
    type Target = ApplicationIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthApplication {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(&state.auth_header)
            .and_then(|value| value.to_str().ok());

        let identity = state.authenticator.authenticate(token).await?;
        tracing::Span::current().record("application", identity.name.as_str());

        Ok(AuthApplication(identity))
    }
}
