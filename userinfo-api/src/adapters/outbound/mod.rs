mod dynamodb;
mod opensearch;
mod redis;

pub use dynamodb::{DynamoDbClientRegistry, DynamoDbCredentialStore};
pub use opensearch::OpenSearchBackend;
pub use self::redis::RedisKeyValueStore;
