//! In-memory port implementations for tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use search_client::{QueryClause, SearchQuery, EXACT_MATCH_SUFFIX};
use serde_json::Value;

use super::{CredentialStore, KeyValueStore, SearchBackend, SearchHits};
use crate::domain::{
    models::{ApplicationIdentity, Partition, SearchIndex},
    Backend, UserInfoError,
};

/// Serves documents from memory. Only `terms` clauses narrow the result;
/// free-text clauses match everything.
#[derive(Default)]
pub struct MockSearchBackend {
    documents: HashMap<SearchIndex, Vec<Value>>,
    queries: Mutex<Vec<(SearchIndex, SearchQuery)>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[allow(dead_code)]
impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(mut self, index: SearchIndex, docs: Vec<Value>) -> Self {
        self.documents.entry(index).or_default().extend(docs);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(SearchIndex, SearchQuery)> {
        self.queries.lock().unwrap().last().cloned()
    }

    fn matches(doc: &Value, query: &SearchQuery) -> bool {
        query.must_clauses().iter().all(|clause| match clause {
            QueryClause::Terms(terms) => {
                let field = terms
                    .field
                    .strip_suffix(EXACT_MATCH_SUFFIX)
                    .unwrap_or(&terms.field);
                doc.get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|value| terms.values.iter().any(|v| v == value))
            }
            _ => true,
        })
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(
        &self,
        index: SearchIndex,
        query: &SearchQuery,
    ) -> Result<SearchHits, UserInfoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push((index, query.clone()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(Backend::Search, "connection refused"));
        }

        let matching: Vec<Value> = self
            .documents
            .get(&index)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(SearchHits {
            total: matching.len() as u64,
            documents: matching
                .into_iter()
                .skip(query.from)
                .take(query.size)
                .collect(),
        })
    }

    async fn ping(&self) -> Result<bool, UserInfoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(Backend::Search, "connection refused"));
        }
        Ok(true)
    }
}

#[derive(Default)]
pub struct MockKeyValueStore {
    entries: HashMap<(Partition, String), String>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[allow(dead_code)]
impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, partition: Partition, key: &str, value: impl Into<String>) -> Self {
        self.entries
            .insert((partition, key.to_string()), value.into());
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, partition: Partition, key: &str) -> Result<Option<String>, UserInfoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(Backend::Cache, "broken pipe"));
        }
        Ok(self.entries.get(&(partition, key.to_string())).cloned())
    }

    async fn ping(&self) -> Result<(), UserInfoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(Backend::Cache, "broken pipe"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCredentialStore {
    identities: HashMap<String, ApplicationIdentity>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[allow(dead_code)]
impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, token: &str, name: &str) -> Self {
        self.identities
            .insert(token.to_string(), ApplicationIdentity::new(token, name));
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_latest_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ApplicationIdentity>, UserInfoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(
                Backend::CredentialTable,
                "service error",
            ));
        }
        Ok(self.identities.get(token).cloned())
    }

    async fn ping(&self) -> Result<(), UserInfoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserInfoError::unavailable(
                Backend::CredentialTable,
                "service error",
            ));
        }
        Ok(())
    }
}
