use std::panic::AssertUnwindSafe;

use axum::http::Method;
use futures::FutureExt;

use crate::{
    db::DbStore,
    error::{AppError, AppResult},
    middleware::cors::CorsPolicy,
    services::{
        context::{SpaceRequest, SpaceResponse},
        spaces_service::SpacesService,
    },
};

/// Routes a request to the Space operation for its method and finishes every
/// response with the CORS headers.
#[derive(Clone)]
pub struct SpacesDispatcher {
    store: DbStore,
    cors: CorsPolicy,
}

impl SpacesDispatcher {
    pub fn new(store: DbStore, cors: CorsPolicy) -> Self {
        Self { store, cors }
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Handles one request. Operation errors and panics become responses;
    /// the only error returned is a missing allowed origin.
    pub async fn dispatch(&self, req: &SpaceRequest) -> AppResult<SpaceResponse> {
        // Nothing may reach the store when the response cannot be completed
        self.cors.require_origin()?;

        let outcome = AssertUnwindSafe(self.route(req)).catch_unwind().await;

        let mut response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => err.into_space_response(),
            Err(_) => {
                AppError::internal(format!("{} handler panicked", req.method)).into_space_response()
            }
        };

        self.cors.add_cors_headers(&mut response, Some(req))?;
        Ok(response)
    }

    async fn route(&self, req: &SpaceRequest) -> AppResult<SpaceResponse> {
        let store = self.store.as_ref();
        match req.method {
            Method::GET => SpacesService::read(req, store).await,
            Method::POST => SpacesService::create(req, store).await,
            Method::PUT => SpacesService::update(req, store).await,
            Method::DELETE => SpacesService::delete(req, store).await,
            ref other => Err(AppError::MethodNotAllowed {
                method: other.to_string(),
            }),
        }
    }
}
