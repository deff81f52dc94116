// CORS policy for the Spaces endpoint
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{AppError, AppResult};
use crate::services::context::{SpaceRequest, SpaceResponse};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str =
    "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token";

/// The single web origin allowed to call the API with credentials.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allowed_origin: Option<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origin: Option<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.filter(|o| !o.is_empty()),
        }
    }

    pub fn allowed_origin(&self) -> Option<&str> {
        self.allowed_origin.as_deref()
    }

    /// The configured origin, or a configuration error when there is none.
    pub fn require_origin(&self) -> AppResult<&str> {
        self.allowed_origin.as_deref().ok_or_else(|| {
            AppError::Config("ALLOWED_ORIGIN is not configured".to_string())
        })
    }

    /// Writes the CORS headers into `response`.
    ///
    /// The request `Origin` is echoed only when it equals the configured
    /// origin; any other origin gets the configured one back. Fails with a
    /// configuration error when no origin is configured.
    pub fn add_cors_headers(
        &self,
        response: &mut SpaceResponse,
        request: Option<&SpaceRequest>,
    ) -> AppResult<()> {
        let allowed = self.require_origin()?;

        let origin = request
            .and_then(SpaceRequest::origin)
            .filter(|origin| *origin == allowed)
            .unwrap_or(allowed);
        let origin = HeaderValue::from_str(origin)
            .map_err(|e| AppError::Config(format!("Invalid allowed origin: {}", e)))?;

        let headers = &mut response.headers;
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        Ok(())
    }

    /// Layer answering browser preflight requests with the same policy.
    /// `None` when no valid origin is configured.
    pub fn preflight_layer(&self) -> Option<CorsLayer> {
        let origin = HeaderValue::from_str(self.allowed_origin.as_deref()?).ok()?;

        Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-amz-date"),
                    header::AUTHORIZATION,
                    HeaderName::from_static("x-api-key"),
                    HeaderName::from_static("x-amz-security-token"),
                ])
                .allow_credentials(true),
        )
    }
}
