use crate::{
    AppState,
    error::AppError,
    middleware::auth::Claims,
    services::context::{SpaceRequest, SpaceResponse},
};
use axum::{
    Extension,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Every method on `/spaces` lands here and goes through the dispatcher.
pub async fn handle_spaces(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    claims: Option<Extension<Claims>>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Raw bytes, so a body that is not UTF-8 still gets a JSON answer
    let mut request = SpaceRequest::new(method).with_body_bytes(&body);
    request.query = query;
    request.claims = claims.map(|Extension(claims)| claims);
    request.headers = headers;

    let response = state.dispatcher.dispatch(&request).await?;
    Ok(into_http(response))
}

fn into_http(response: SpaceResponse) -> Response {
    (response.status, response.headers, response.body).into_response()
}
