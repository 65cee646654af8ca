use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ClusterHealth, SearchClientError, SearchQuery, SearchResponse};

/// Where the search cluster lives.
#[derive(Debug, Clone)]
pub struct SearchEndpoint {
    pub hostname: String,
    pub secure: bool,
}

impl SearchEndpoint {
    pub fn url(&self) -> Result<Url, SearchClientError> {
        let scheme = if self.secure { "https" } else { "http" };
        Url::parse(&format!("{scheme}://{}/", self.hostname))
            .map_err(|e| SearchClientError::InvalidEndpoint(format!("{}: {e}", self.hostname)))
    }
}

#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SearchClientOptions {
    pub credentials: Option<BasicCredentials>,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for SearchClientOptions {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Thin client for the `_search` and `_cluster/health` endpoints of an
/// OpenSearch/Elasticsearch cluster. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: Url,
    credentials: Option<BasicCredentials>,
}

impl SearchClient {
    pub fn new(
        endpoint: &SearchEndpoint,
        options: SearchClientOptions,
    ) -> Result<Self, SearchClientError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| SearchClientError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            http,
            base_url: endpoint.url()?,
            credentials: options.credentials,
        })
    }

    pub fn search_url(&self, index: &str) -> Result<Url, SearchClientError> {
        self.base_url
            .join(&format!("{index}/_search"))
            .map_err(|e| SearchClientError::InvalidEndpoint(e.to_string()))
    }

    /// Runs `query` against `index` and decodes each hit's `_source` as `T`.
    #[tracing::instrument(skip(self, query), fields(from = query.from, size = query.size))]
    pub async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse<T>, SearchClientError> {
        let url = self.search_url(index)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let payload = serde_json::to_string(query).unwrap_or_default();
            tracing::debug!(%url, %payload, "sending search request");
        }

        let request = self.authorize(self.http.post(url).json(query));
        self.send(request).await
    }

    pub async fn cluster_health(&self) -> Result<ClusterHealth, SearchClientError> {
        let url = self
            .base_url
            .join("_cluster/health")
            .map_err(|e| SearchClientError::InvalidEndpoint(e.to_string()))?;

        let request = self.authorize(self.http.get(url));
        self.send(request).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SearchClientError> {
        let resp = request
            .send()
            .await
            .map_err(|e| SearchClientError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| {
            SearchClientError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(hostname: &str, secure: bool) -> SearchClient {
        SearchClient::new(
            &SearchEndpoint {
                hostname: hostname.to_string(),
                secure,
            },
            SearchClientOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_scheme_follows_secure_flag() {
        assert_eq!(
            client("search.internal:9200", false).base_url.as_str(),
            "http://search.internal:9200/"
        );
        assert_eq!(
            client("vpc-users.eu-west-1.es.amazonaws.com", true)
                .base_url
                .as_str(),
            "https://vpc-users.eu-west-1.es.amazonaws.com/"
        );
    }

    #[test]
    fn search_url_targets_index() {
        let url = client("localhost:9200", false).search_url("location").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9200/location/_search");
    }

    #[test]
    fn empty_hostname_is_rejected() {
        let result = SearchEndpoint {
            hostname: String::new(),
            secure: true,
        }
        .url();

        assert!(matches!(result, Err(SearchClientError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn unreachable_cluster_is_a_response_error() {
        let client = SearchClient::new(
            &SearchEndpoint {
                hostname: "127.0.0.1:1".to_string(),
                secure: false,
            },
            SearchClientOptions {
                timeout: Duration::from_millis(500),
                ..Default::default()
            },
        )
        .unwrap();

        let result = client.cluster_health().await;
        assert!(matches!(result, Err(SearchClientError::ResponseError(_))));
    }
}
