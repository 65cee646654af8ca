use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{SearchEntity, SearchIndex};

/// A user document from the `user` index. Field names are shared by the index
/// and the public API.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uuid: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub job_role: Option<String>,
    pub email: Option<String>,
    pub user_id: Option<String>,
    pub account_name: Option<String>,
    #[serde(default)]
    pub is_internal: bool,
    pub location_account_id: Option<String>,
    pub nearest_legal_entity_id: Option<String>,
    pub ultimate_parent_id: Option<String>,
    pub preferred_language: Option<String>,
    pub last_success_login: Option<String>,
    pub geographical_focus: Option<String>,
    pub job_role_code: Option<String>,
    pub asset_class_code: Option<String>,
    #[serde(rename = "lastUpdatedByAAAOn")]
    pub last_updated_by_aaa_on: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl SearchEntity for User {
    const KIND: &'static str = "user";
    const INDEX: SearchIndex = SearchIndex::Users;
    const ID_FIELD: &'static str = "uuid";
    const DEFAULT_FIELDS: &'static [&'static str] =
        &["firstname", "lastname", "email", "uuid", "userId"];
}
