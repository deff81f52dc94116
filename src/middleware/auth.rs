use crate::{AppState, error::AppError, services::context::SpaceRequest};
use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Claim listing the identity-pool groups of the caller.
pub const GROUPS_CLAIM: &str = "cognito:groups";
/// Group allowed to run destructive operations.
pub const ADMIN_GROUP: &str = "admins";

/// Caller claims decoded from the bearer token, kept as an open map: the
/// identity service decides which claims exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Groups named by the groups claim. The claim arrives either as a JSON
    /// array or flattened into a string such as `"admins,users"` or
    /// `"[admins users]"`.
    pub fn groups(&self) -> Vec<&str> {
        match self.get(GROUPS_CLAIM) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(raw)) => raw
                .split(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace())
                .filter(|g| !g.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups().contains(&group)
    }
}

impl From<Value> for Claims {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Claims(map),
            _ => Claims::default(),
        }
    }
}

/// True iff the caller's groups claim contains the admin group. Any missing
/// piece (no claims, no groups claim, unexpected shape) reads as false.
pub fn has_admin_group(request: &SpaceRequest) -> bool {
    request
        .claims
        .as_ref()
        .is_some_and(|claims| claims.in_group(ADMIN_GROUP))
}

pub enum AuthConfig {
    /// HS256 with a shared secret.
    Secret(String),
    /// RS256 with a PEM-encoded public key.
    RsaPublicKey(String),
}

#[derive(Clone)]
pub struct AuthService {
    key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Result<Self, AppError> {
        let (key, algorithm) = match config {
            AuthConfig::Secret(secret) => (
                DecodingKey::from_secret(secret.as_bytes()),
                Algorithm::HS256,
            ),
            AuthConfig::RsaPublicKey(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::Config(format!("Invalid JWT public key: {}", e)))?,
                Algorithm::RS256,
            ),
        };

        Ok(Self {
            key,
            validation: Validation::new(algorithm),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 验证token
    let claims = state
        .auth_service
        .verify_token(token.token())
        .map_err(|e| {
            tracing::warn!("JWT validation failed: {}", e);
            StatusCode::UNAUTHORIZED
        })?;

    // 将调用方声明添加到请求扩展中
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
