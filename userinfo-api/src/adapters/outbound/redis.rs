use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use url::Url;

use crate::{
    config::CacheSettings,
    domain::{
        models::Partition,
        ports::outbound::KeyValueStore,
        Backend, UserInfoError,
    },
};

/// One managed connection per partition, each bound to its own database
/// index. Connections reconnect on their own after failures.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    user_accounts: ConnectionManager,
    location_accounts: ConnectionManager,
}

impl RedisKeyValueStore {
    pub async fn connect(settings: &CacheSettings) -> Result<Self, UserInfoError> {
        let user_accounts = Self::manager(&settings.url, settings.user_accounts_db).await?;
        let location_accounts = Self::manager(&settings.url, settings.location_accounts_db).await?;

        Ok(Self {
            user_accounts,
            location_accounts,
        })
    }

    async fn manager(base_url: &str, db: u32) -> Result<ConnectionManager, UserInfoError> {
        let url = database_url(base_url, db)?;
        let client =
            Client::open(url.as_str()).map_err(|e| UserInfoError::unavailable(Backend::Cache, e))?;

        tracing::debug!(db, "opening cache connection");
        client
            .get_connection_manager()
            .await
            .map_err(|e| UserInfoError::unavailable(Backend::Cache, e))
    }

    fn connection(&self, partition: Partition) -> ConnectionManager {
        match partition {
            Partition::UserAccounts => self.user_accounts.clone(),
            Partition::LocationAccounts => self.location_accounts.clone(),
        }
    }
}

/// `redis://host:port` with the path replaced by the database index.
fn database_url(base_url: &str, db: u32) -> Result<Url, UserInfoError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| UserInfoError::unavailable(Backend::Cache, format!("{base_url}: {e}")))?;
    url.set_path(&format!("/{db}"));
    Ok(url)
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, partition: Partition, key: &str) -> Result<Option<String>, UserInfoError> {
        let mut conn = self.connection(partition);
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| UserInfoError::unavailable(Backend::Cache, e))
    }

    async fn ping(&self) -> Result<(), UserInfoError> {
        for partition in [Partition::UserAccounts, Partition::LocationAccounts] {
            let mut conn = self.connection(partition);
            let pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| UserInfoError::unavailable(Backend::Cache, e))?;
            tracing::trace!(%partition, %pong);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_index_goes_in_the_path() {
        let url = database_url("redis://cache.internal:6379", 1).unwrap();
        assert_eq!(url.as_str(), "redis://cache.internal:6379/1");
    }

    #[test]
    fn existing_path_is_replaced() {
        let url = database_url("rediss://:secret@cache.internal:6380/5", 0).unwrap();
        assert_eq!(url.path(), "/0");
        assert_eq!(url.password(), Some("secret"));
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            database_url("not a url", 0),
            Err(UserInfoError::BackendUnavailable { .. })
        ));
    }
}
