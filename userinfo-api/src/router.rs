use axum::{body::Body, http::HeaderName, http::Request, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    app_state::AppState,
    routes,
    telemetry::{self, TRACE_ID_HEADER},
};

pub fn create(app_state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .nest("/UserInfo", routes::user_info::router())
        .route("/HealthCheck", get(routes::health::health_check))
        .with_state(app_state)
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(
            TRACE_ID_HEADER,
        )))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| telemetry::make_request_span(request)),
        )
}
