use async_trait::async_trait;

use crate::domain::{models::Partition, UserInfoError};

/// Point reads against the partitioned cache store. Implementations must be
/// safe to call concurrently.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, partition: Partition, key: &str) -> Result<Option<String>, UserInfoError>;

    async fn ping(&self) -> Result<(), UserInfoError>;
}
