use axum::{body::Body, http::Request};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const TRACE_ID_HEADER: &str = "x-amzn-trace-id";
pub const CLIENT_NAME_HEADER: &str = "x-clientname";
pub const SDK_VERSION_HEADER: &str = "x-sdk-version";

const DEFAULT_FILTER: &str = "userinfo_api=debug,search_client=debug,tower_http=info";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn header<'a>(request: &'a Request<Body>, name: &str) -> &'a str {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Request span carrying the caller context headers. `application` is filled
/// in once the caller has been authenticated.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        trace_id = header(request, TRACE_ID_HEADER),
        client = header(request, CLIENT_NAME_HEADER),
        sdk = header(request, SDK_VERSION_HEADER),
        application = tracing::field::Empty,
    )
}
