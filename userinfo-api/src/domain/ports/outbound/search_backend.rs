use async_trait::async_trait;
use search_client::SearchQuery;
use serde_json::Value;

use crate::domain::{models::SearchIndex, UserInfoError};

/// Raw hits of one search request, still undecoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub documents: Vec<Value>,
}

#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn search(
        &self,
        index: SearchIndex,
        query: &SearchQuery,
    ) -> Result<SearchHits, UserInfoError>;

    /// `Ok(true)` when the cluster reports a usable status.
    async fn ping(&self) -> Result<bool, UserInfoError>;
}
