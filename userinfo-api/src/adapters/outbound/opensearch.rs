use async_trait::async_trait;
use search_client::{SearchClient, SearchClientError, SearchQuery};
use serde_json::Value;

use crate::domain::{
    models::SearchIndex,
    ports::outbound::{SearchBackend, SearchHits},
    Backend, UserInfoError,
};

pub struct OpenSearchBackend {
    client: SearchClient,
    user_index: String,
    location_index: String,
}

impl OpenSearchBackend {
    pub fn new(
        client: SearchClient,
        user_index: impl Into<String>,
        location_index: impl Into<String>,
    ) -> Self {
        Self {
            client,
            user_index: user_index.into(),
            location_index: location_index.into(),
        }
    }

    fn index_name(&self, index: SearchIndex) -> &str {
        match index {
            SearchIndex::Users => &self.user_index,
            SearchIndex::Locations => &self.location_index,
        }
    }
}

fn to_domain_error(err: SearchClientError) -> UserInfoError {
    match err {
        SearchClientError::ParsingError(_) => UserInfoError::malformed(Backend::Search, err),
        _ => UserInfoError::unavailable(Backend::Search, err),
    }
}

#[async_trait]
impl SearchBackend for OpenSearchBackend {
    async fn search(
        &self,
        index: SearchIndex,
        query: &SearchQuery,
    ) -> Result<SearchHits, UserInfoError> {
        let response = self
            .client
            .search::<Value>(self.index_name(index), query)
            .await
            .map_err(to_domain_error)?;

        Ok(SearchHits {
            total: response.total(),
            documents: response.into_documents(),
        })
    }

    async fn ping(&self) -> Result<bool, UserInfoError> {
        let health = self
            .client
            .cluster_health()
            .await
            .map_err(to_domain_error)?;
        Ok(health.is_healthy())
    }
}

#[cfg(test)]
mod tests {
    use search_client::{SearchClientOptions, SearchEndpoint};

    use super::*;

    fn backend() -> OpenSearchBackend {
        let client = SearchClient::new(
            &SearchEndpoint {
                hostname: "127.0.0.1:1".to_string(),
                secure: false,
            },
            SearchClientOptions::default(),
        )
        .unwrap();
        OpenSearchBackend::new(client, "users-v2", "locations-v2")
    }

    #[test]
    fn logical_index_maps_to_configured_name() {
        let backend = backend();
        assert_eq!(backend.index_name(SearchIndex::Users), "users-v2");
        assert_eq!(backend.index_name(SearchIndex::Locations), "locations-v2");
    }

    #[tokio::test]
    async fn unreachable_cluster_is_unavailable() {
        let err = backend()
            .search(SearchIndex::Users, &SearchQuery::terms_lookup("uuid", ["u-1"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UserInfoError::BackendUnavailable {
                backend: Backend::Search,
                ..
            }
        ));
    }
}
