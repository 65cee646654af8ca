use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiError;
use crate::app_state::AppState;

/// Flags that force a check to fail, for exercising alarms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthQuery {
    #[serde(default)]
    pub search_error: bool,
    #[serde(default)]
    pub redis_error: bool,
    #[serde(default)]
    pub dynamo_error: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub environment: String,
    pub region: String,
    pub search_healthy: bool,
    pub redis_connection: bool,
    pub dynamo_db_healthy: bool,
}

#[instrument(name = "GET /HealthCheck", skip(app_state))]
pub async fn health_check(
    State(app_state): State<AppState>,
    Query(query): Query<HealthQuery>,
) -> Result<Json<HealthReport>, ApiError> {
    let search_healthy = !query.search_error
        && app_state
            .backends
            .search
            .ping()
            .await
            .inspect_err(|e| tracing::error!("Search health check failed: {}", e))
            .unwrap_or(false);
    if !search_healthy {
        return Err(ApiError::service_unavailable("OpenSearch is unavailable"));
    }

    let redis_connection = !query.redis_error
        && app_state
            .backends
            .cache
            .ping()
            .await
            .inspect_err(|e| tracing::error!("Redis health check failed: {}", e))
            .is_ok();
    if !redis_connection {
        return Err(ApiError::service_unavailable("Redis is unavailable"));
    }

    let dynamo_db_healthy = !query.dynamo_error
        && app_state
            .backends
            .credentials
            .ping()
            .await
            .inspect_err(|e| tracing::error!("DynamoDB health check failed: {}", e))
            .is_ok();
    if !dynamo_db_healthy {
        return Err(ApiError::service_unavailable("DynamoDB is unavailable"));
    }

    Ok(Json(HealthReport {
        status: "OK",
        environment: app_state.deployment.environment.clone(),
        region: app_state.deployment.region.clone(),
        search_healthy,
        redis_connection,
        dynamo_db_healthy,
    }))
}
