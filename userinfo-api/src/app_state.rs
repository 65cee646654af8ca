use std::sync::Arc;

use axum::http::HeaderName;

use crate::{
    auth::{ApplicationAuthenticator, IdentityCache},
    domain::{
        ports::{
            inbound::UserInfoService,
            outbound::{CredentialStore, KeyValueStore, SearchBackend},
        },
        services::UserInfoServiceImpl,
    },
};

/// Long-lived backend clients, shared by every request.
#[derive(Clone)]
pub struct Backends {
    pub search: Arc<dyn SearchBackend>,
    pub cache: Arc<dyn KeyValueStore>,
    pub credentials: Arc<dyn CredentialStore>,
}

/// Where this instance runs, as reported by the health check.
#[derive(Clone, Debug, Default)]
pub struct Deployment {
    pub environment: String,
    pub region: String,
}

#[derive(Clone)]
pub struct AppState {
    pub user_info: Arc<dyn UserInfoService>,
    pub authenticator: ApplicationAuthenticator,
    pub backends: Backends,
    pub deployment: Deployment,
    pub auth_header: HeaderName,
}

impl AppState {
    pub fn new(
        backends: Backends,
        identity_cache: Arc<dyn IdentityCache>,
        deployment: Deployment,
        auth_header: HeaderName,
    ) -> Self {
        let user_info: Arc<dyn UserInfoService> = Arc::new(UserInfoServiceImpl::new(
            Arc::clone(&backends.search),
            Arc::clone(&backends.cache),
        ));
        let authenticator =
            ApplicationAuthenticator::new(Arc::clone(&backends.credentials), identity_cache);

        Self {
            user_info,
            authenticator,
            backends,
            deployment,
            auth_header,
        }
    }
}
