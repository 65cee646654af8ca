use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use search_client::BoundaryFilter;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use tracing::instrument;

use super::ApiError;
use crate::{
    app_state::AppState,
    auth::AuthApplication,
    domain::models::{Location, LocationAccount, SearchCriteria, SortDirection, User, UserAccount},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getUserByUuid/:uuid", get(get_user_by_uuid))
        .route("/getUsersByUuids", post(get_users_by_uuids))
        .route(
            "/getLocationByLocationId/:location_id",
            get(get_location_by_location_id),
        )
        .route(
            "/getLocationsByLocationIds",
            post(get_locations_by_location_ids),
        )
        .route("/searchUser", post(search_user))
        .route("/searchLocation", post(search_location))
        .route("/getUserAccounts", post(get_user_accounts))
        .route("/getLocationAccounts", post(get_location_accounts))
}

/// Body of `searchUser` and `searchLocation`.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keyword: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    pub search_fields: Option<Vec<String>>,
    pub filters: Option<Vec<BoundaryFilter>>,
    pub sort_by: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub sort_direction: Option<SortDirection>,
}

fn default_limit() -> usize {
    SearchCriteria::DEFAULT_LIMIT
}

impl From<SearchRequest> for SearchCriteria {
    fn from(request: SearchRequest) -> Self {
        let criteria = SearchCriteria::new(request.keyword.unwrap_or_default())
            .with_fields(request.search_fields.unwrap_or_default())
            .with_filters(request.filters.unwrap_or_default())
            .with_page(request.offset, request.limit);

        match request.sort_by {
            Some(field) => criteria.with_sort(field, request.sort_direction.unwrap_or_default()),
            None => criteria,
        }
    }
}

#[instrument(name = "GET /UserInfo/getUserByUuid", skip(app_state, _app))]
async fn get_user_by_uuid(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<User>, ApiError> {
    tracing::info!("Start GET getUserByUuid");
    let user = app_state.user_info.get_user_by_uuid(&uuid).await?;
    Ok(Json(user))
}

#[instrument(name = "POST /UserInfo/getUsersByUuids", skip_all)]
async fn get_users_by_uuids(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(uuids): Json<Vec<String>>,
) -> Result<Json<Vec<User>>, ApiError> {
    tracing::info!("Start POST getUsersByUuids");
    let users = app_state.user_info.get_users_by_uuids(&uuids).await?;
    Ok(Json(users))
}

#[instrument(name = "GET /UserInfo/getLocationByLocationId", skip(app_state, _app))]
async fn get_location_by_location_id(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Path(location_id): Path<String>,
) -> Result<Json<Location>, ApiError> {
    tracing::info!("Start GET getLocationByLocationId");
    let location = app_state
        .user_info
        .get_location_by_location_id(&location_id)
        .await?;
    Ok(Json(location))
}

#[instrument(name = "POST /UserInfo/getLocationsByLocationIds", skip_all)]
async fn get_locations_by_location_ids(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(location_ids): Json<Vec<String>>,
) -> Result<Json<Vec<Location>>, ApiError> {
    tracing::info!("Start POST getLocationsByLocationIds");
    let locations = app_state
        .user_info
        .get_locations_by_location_ids(&location_ids)
        .await?;
    Ok(Json(locations))
}

#[instrument(name = "POST /UserInfo/searchUser", skip_all)]
async fn search_user(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<User>>, ApiError> {
    tracing::info!("Start POST searchUser");
    let users = app_state.user_info.search_users(request.into()).await?;
    Ok(Json(users))
}

#[instrument(name = "POST /UserInfo/searchLocation", skip_all)]
async fn search_location(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<Location>>, ApiError> {
    tracing::info!("Start POST searchLocation");
    let locations = app_state.user_info.search_locations(request.into()).await?;
    Ok(Json(locations))
}

#[instrument(name = "POST /UserInfo/getUserAccounts", skip_all)]
async fn get_user_accounts(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(uuids): Json<Vec<String>>,
) -> Result<Json<Vec<UserAccount>>, ApiError> {
    tracing::info!("Start POST getUserAccounts");
    let accounts = app_state.user_info.get_user_accounts(&uuids).await?;
    Ok(Json(accounts))
}

#[instrument(name = "POST /UserInfo/getLocationAccounts", skip_all)]
async fn get_location_accounts(
    _app: AuthApplication,
    State(app_state): State<AppState>,
    Json(location_ids): Json<Vec<String>>,
) -> Result<Json<Vec<LocationAccount>>, ApiError> {
    tracing::info!("Start POST getLocationAccounts");
    let accounts = app_state
        .user_info
        .get_location_accounts(&location_ids)
        .await?;
    Ok(Json(accounts))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::models::SortSpec;

    #[test]
    fn search_request_defaults() {
        let request: SearchRequest = serde_json::from_value(json!({ "keyword": "ada" })).unwrap();
        let criteria = SearchCriteria::from(request);

        assert_eq!(criteria.limit, 10);
        assert_eq!(criteria.offset, 0);
        assert!(criteria.fields.is_empty());
        assert!(criteria.sort.is_none());
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        let request: SearchRequest = serde_json::from_value(json!({
            "keyword": "ada",
            "sortBy": "lastname",
            "filters": [{ "fieldName": "locationAccountId", "values": ["acc-1"] }]
        }))
        .unwrap();
        let criteria = SearchCriteria::from(request);

        assert_eq!(
            criteria.sort,
            Some(SortSpec {
                field: "lastname".to_string(),
                direction: SortDirection::Ascending,
            })
        );
        assert_eq!(criteria.filters[0].field_name, "locationAccountId");
    }

    #[test]
    fn sort_direction_ignores_case() {
        for direction in ["desc", "DESC", "Desc"] {
            let request: SearchRequest = serde_json::from_value(json!({
                "keyword": "ada",
                "sortBy": "lastname",
                "sortDirection": direction
            }))
            .unwrap();
            assert_eq!(
                SearchCriteria::from(request).sort.map(|s| s.direction),
                Some(SortDirection::Descending)
            );
        }
    }

    #[test]
    fn unknown_sort_direction_is_rejected() {
        let result = serde_json::from_value::<SearchRequest>(json!({
            "keyword": "ada",
            "sortDirection": "sideways"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_keyword_becomes_empty() {
        let request: SearchRequest =
            serde_json::from_value(json!({ "sortDirection": "DESC" })).unwrap();
        assert_eq!(SearchCriteria::from(request).keyword, "");
    }
}
