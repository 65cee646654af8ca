//! Composition root: the only place that builds concrete outbound adapters.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderName;
use search_client::{BasicCredentials, SearchClient, SearchClientOptions, SearchEndpoint};

use crate::{
    adapters::outbound::{
        DynamoDbClientRegistry, DynamoDbCredentialStore, OpenSearchBackend, RedisKeyValueStore,
    },
    app_state::{AppState, Backends, Deployment},
    auth::{IdentityCachePolicy, MokaIdentityCache},
    config::{SearchSettings, Settings},
};

fn search_client(settings: &SearchSettings) -> anyhow::Result<SearchClient> {
    let credentials = match (&settings.username, &settings.password) {
        (Some(username), Some(password)) => Some(BasicCredentials {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let endpoint = SearchEndpoint {
        hostname: settings.endpoint.clone(),
        secure: settings.secure,
    };
    let options = SearchClientOptions {
        credentials,
        timeout: settings.timeout(),
        accept_invalid_certs: settings.accept_invalid_certs,
    };

    SearchClient::new(&endpoint, options).context("invalid search endpoint")
}

/// Builds every backend client up front and wires them into the app state.
pub async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let search = OpenSearchBackend::new(
        search_client(&settings.search)?,
        &settings.search.user_index,
        &settings.search.location_index,
    );

    let cache = RedisKeyValueStore::connect(&settings.cache)
        .await
        .context("failed to connect to the cache store")?;

    let registry = DynamoDbClientRegistry::load(
        &settings.credentials.region,
        &settings.credentials.extra_regions,
    )
    .await;
    let credentials = DynamoDbCredentialStore::new(registry, &settings.credentials);

    let policy = IdentityCachePolicy::from(&settings.identity_cache);
    let identity_cache = Arc::new(MokaIdentityCache::new(policy));

    let auth_header = HeaderName::try_from(settings.credentials.header_name.to_ascii_lowercase())
        .context("invalid credentials.header_name")?;

    Ok(AppState::new(
        Backends {
            search: Arc::new(search),
            cache: Arc::new(cache),
            credentials: Arc::new(credentials),
        },
        identity_cache,
        Deployment {
            environment: settings.application.environment.clone(),
            region: settings.application.region.clone(),
        },
        auth_header,
    ))
}
