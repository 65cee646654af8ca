use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::{
    models::PartitionRecord, ports::outbound::KeyValueStore, Backend, UserInfoError,
};

/// Concurrent point reads of many keys from one cache partition.
pub struct BatchFetcher<K: ?Sized> {
    store: Arc<K>,
}

impl<K: ?Sized> Clone for BatchFetcher<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<K: KeyValueStore + ?Sized> BatchFetcher<K> {
    pub fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    /// Reads every key of `ids` from the record's partition. Misses are
    /// dropped; one failed read or one undecodable value fails the batch.
    #[tracing::instrument(name = "BatchFetcher::fetch_many", skip(self, ids), fields(partition = %T::PARTITION, count = ids.len()))]
    pub async fn fetch_many<T: PartitionRecord>(
        &self,
        ids: &[String],
    ) -> Result<Vec<T>, UserInfoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let reads = ids
            .iter()
            .map(|id| self.store.get(T::PARTITION, id.as_str()));
        let values = try_join_all(reads).await?;

        let records = values
            .into_iter()
            .flatten()
            .map(|raw| serde_json::from_str::<T>(&raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| UserInfoError::malformed(Backend::Cache, e))?;

        tracing::debug!(found = records.len(), "batch read complete");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::{CachedLocationAccount, CachedUserAccount, Partition},
        ports::outbound::mock::MockKeyValueStore,
    };

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_ids_skip_the_store() {
        let store = Arc::new(MockKeyValueStore::new());
        let fetcher = BatchFetcher::new(store.clone());

        let records: Vec<CachedUserAccount> = fetcher.fetch_many(&[]).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn misses_are_dropped() {
        let store = Arc::new(MockKeyValueStore::new().with_entry(
            Partition::UserAccounts,
            "a",
            r#"{"Id":"a","fn":"Ada"}"#,
        ));
        let fetcher = BatchFetcher::new(store.clone());

        let records: Vec<CachedUserAccount> =
            fetcher.fetch_many(&ids(&["a", "b"])).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn reads_only_the_records_partition() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_entry(Partition::UserAccounts, "x", r#"{"Id":"x"}"#)
                .with_entry(Partition::LocationAccounts, "x", r#"{"AccId":"x"}"#),
        );
        let fetcher = BatchFetcher::new(store);

        let records: Vec<CachedLocationAccount> =
            fetcher.fetch_many(&ids(&["x"])).await.unwrap();

        assert_eq!(records[0].location_account_id.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn undecodable_value_fails_the_batch() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_entry(Partition::UserAccounts, "a", r#"{"Id":"a"}"#)
                .with_entry(Partition::UserAccounts, "b", "not json"),
        );
        let fetcher = BatchFetcher::new(store);

        let result = fetcher
            .fetch_many::<CachedUserAccount>(&ids(&["a", "b"]))
            .await;

        assert!(matches!(
            result,
            Err(UserInfoError::MalformedRecord {
                backend: Backend::Cache,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn failed_read_fails_the_batch() {
        let store = Arc::new(MockKeyValueStore::new());
        store.set_failing(true);
        let fetcher = BatchFetcher::new(store);

        let result = fetcher.fetch_many::<CachedUserAccount>(&ids(&["a"])).await;

        assert!(matches!(
            result,
            Err(UserInfoError::BackendUnavailable { .. })
        ));
    }
}
