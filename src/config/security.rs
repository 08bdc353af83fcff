use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Stamps the standard security response headers onto every response.
/// HSTS is only added in production, where the API sits behind HTTPS.
pub fn apply_security_headers(router: Router) -> Router {
    let router = router
        .layer(header_layer(header::X_CONTENT_TYPE_OPTIONS, NOSNIFF))
        .layer(header_layer(header::X_FRAME_OPTIONS, DENY))
        .layer(header_layer(header::X_XSS_PROTECTION, XSS_BLOCK))
        .layer(header_layer(header::CONTENT_SECURITY_POLICY, CSP_API_VALUE))
        .layer(header_layer(header::REFERRER_POLICY, REFERRER_POLICY_VALUE))
        .layer(header_layer(
            HeaderName::from_static("permissions-policy"),
            PERMISSIONS_POLICY_VALUE,
        ));

    if hsts_enabled() {
        router.layer(header_layer(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE))
    } else {
        router
    }
}

fn header_layer(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

fn hsts_enabled() -> bool {
    let is_production = env::var("RUST_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if is_production {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    is_production
}
