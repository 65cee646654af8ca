use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};

use crate::{
    config::CredentialSettings,
    domain::{
        models::ApplicationIdentity,
        ports::outbound::CredentialStore,
        Backend, UserInfoError,
    },
};

const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 2;

/// DynamoDB clients keyed by region, all built at startup.
#[derive(Clone, Debug)]
pub struct DynamoDbClientRegistry {
    default_region: String,
    clients: HashMap<String, Client>,
}

impl DynamoDbClientRegistry {
    pub async fn load(default_region: &str, extra_regions: &[String]) -> Self {
        let mut clients = HashMap::new();
        for region in std::iter::once(default_region).chain(extra_regions.iter().map(String::as_str)) {
            if clients.contains_key(region) {
                continue;
            }
            tracing::debug!(region, "building DynamoDB client");
            clients.insert(region.to_string(), build_client(region).await);
        }

        Self {
            default_region: default_region.to_string(),
            clients,
        }
    }

    #[cfg(test)]
    pub fn from_clients(default_region: &str, clients: HashMap<String, Client>) -> Self {
        Self {
            default_region: default_region.to_string(),
            clients,
        }
    }

    /// Client for the region the service is deployed in.
    pub fn default_client(&self) -> Option<&Client> {
        self.clients.get(&self.default_region)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &Client)> {
        self.clients.iter().map(|(r, c)| (r.as_str(), c))
    }
}

async fn build_client(region: &str) -> Client {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(OPERATION_TIMEOUT)
                .build(),
        )
        .retry_config(RetryConfig::standard().with_max_attempts(MAX_ATTEMPTS))
        .load()
        .await;
    Client::new(&sdk_config)
}

/// Application credentials table, queried through its token index.
pub struct DynamoDbCredentialStore {
    registry: DynamoDbClientRegistry,
    table_name: String,
    index_name: String,
}

impl DynamoDbCredentialStore {
    pub fn new(registry: DynamoDbClientRegistry, settings: &CredentialSettings) -> Self {
        Self {
            registry,
            table_name: settings.table_name.clone(),
            index_name: settings.index_name.clone(),
        }
    }

    fn client(&self) -> Result<&Client, UserInfoError> {
        self.registry.default_client().ok_or_else(|| {
            UserInfoError::unavailable(Backend::CredentialTable, "no client for default region")
        })
    }
}

fn string_attribute(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
}

#[async_trait]
impl CredentialStore for DynamoDbCredentialStore {
    async fn find_latest_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ApplicationIdentity>, UserInfoError> {
        let output = self
            .client()?
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("appid = :v_appid")
            .expression_attribute_values(":v_appid", AttributeValue::S(token.to_string()))
            .projection_expression("appid, appname")
            .scan_index_forward(false)
            .limit(1)
            .send()
            .await
            .map_err(|e| {
                UserInfoError::unavailable(Backend::CredentialTable, DisplayErrorContext(e))
            })?;

        Ok(output.items().first().map(|item| {
            ApplicationIdentity::new(
                string_attribute(item, "appid").unwrap_or_default(),
                string_attribute(item, "appname").unwrap_or_default(),
            )
        }))
    }

    async fn ping(&self) -> Result<(), UserInfoError> {
        for (region, client) in self.registry.regions() {
            client
                .describe_table()
                .table_name(&self.table_name)
                .send()
                .await
                .map_err(|e| {
                    UserInfoError::unavailable(
                        Backend::CredentialTable,
                        format!("{region}: {}", DisplayErrorContext(e)),
                    )
                })?;
        }
        Ok(())
    }
}
