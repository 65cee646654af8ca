//! Account enrichment records as stored in the cache partitions (compact key
//! names) and as returned to callers (descriptive names).
//!
//! The field-by-field mapping between the two lives in
//! [`crate::domain::projection`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_with::skip_serializing_none;
use strum::Display;

/// A logical namespace of the cache store. Each maps to its own database
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Partition {
    #[strum(serialize = "user-accounts")]
    UserAccounts,
    #[strum(serialize = "location-accounts")]
    LocationAccounts,
}

/// A record type stored in a cache partition.
pub trait PartitionRecord: DeserializeOwned + Send + 'static {
    const PARTITION: Partition;
}

/// User account blob from the user-accounts partition.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedUserAccount {
    #[serde(rename = "Id")]
    pub uuid: Option<String>,
    #[serde(rename = "AccId")]
    pub location_account_id: Option<String>,
    #[serde(rename = "NleId")]
    pub nearest_legal_entity_id: Option<String>,
    #[serde(rename = "UpId")]
    pub ultimate_parent_id: Option<String>,
    #[serde(rename = "IsInternal", default)]
    pub is_internal: bool,
    #[serde(rename = "fn")]
    pub first_name: Option<String>,
    #[serde(rename = "sn")]
    pub last_name: Option<String>,
    #[serde(rename = "mail")]
    pub email: Option<String>,
    #[serde(rename = "jr")]
    pub job_role: Option<String>,
    #[serde(rename = "an")]
    pub account_name: Option<String>,
}

impl PartitionRecord for CachedUserAccount {
    const PARTITION: Partition = Partition::UserAccounts;
}

/// Location account blob from the location-accounts partition. Note that
/// `isInternal` is stored as a string here, unlike in the user partition.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedLocationAccount {
    #[serde(rename = "AccId")]
    pub location_account_id: Option<String>,
    #[serde(rename = "nleId")]
    pub nearest_legal_entity_id: Option<String>,
    #[serde(rename = "upId")]
    pub ultimate_parent_id: Option<String>,
    #[serde(rename = "isInternal")]
    pub is_internal: Option<String>,
}

impl PartitionRecord for CachedLocationAccount {
    const PARTITION: Partition = Partition::LocationAccounts;
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub uuid: Option<String>,
    pub location_account_id: Option<String>,
    pub nearest_legal_entity_id: Option<String>,
    pub ultimate_parent_id: Option<String>,
    pub is_internal: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub job_role: Option<String>,
    pub account_name: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAccount {
    pub location_account_id: Option<String>,
    pub nearest_legal_entity_id: Option<String>,
    pub ultimate_parent_id: Option<String>,
    pub is_internal: Option<String>,
}
