use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::db::models::api::{MessageBody, messages};
use crate::db::repositories::StoreError;
use crate::services::context::SpaceResponse;

#[derive(Error, Debug)]
pub enum AppError {
    /// A backing-store call failed. `message` is the generic text the caller
    /// sees; the source is only logged.
    #[error("Store error: {source}")]
    Store {
        #[source]
        source: StoreError,
        message: &'static str,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Option<Vec<String>>,
    },

    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Forbidden")]
    Forbidden,

    #[error("{message}")]
    NotFound { message: String },

    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            message: messages::INTERNAL_ERROR,
        }
    }
}

// 便捷的错误创建函数
impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation_with(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Some(errors),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wraps a store failure, reporting `message` to the caller.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { source, message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::MissingFields { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store { .. } | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body sent to the caller. Server-side failures are logged here and
    /// reduced to a generic message.
    pub fn body(self) -> MessageBody {
        match self {
            AppError::Store { source, message } => {
                tracing::error!("Store error: {}", source);
                MessageBody::new(message)
            }
            AppError::Validation { message, errors } => match errors {
                Some(errors) => MessageBody::with_errors(message, errors),
                None => MessageBody::new(message),
            },
            AppError::MissingFields { fields } => MessageBody::missing_fields(fields),
            AppError::Forbidden => MessageBody::new(messages::FORBIDDEN),
            AppError::NotFound { message } => MessageBody::new(message),
            AppError::MethodNotAllowed { .. } => MessageBody::new(messages::METHOD_NOT_ALLOWED),
            AppError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                MessageBody::new(messages::CONFIGURATION_ERROR)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                MessageBody::new(messages::INTERNAL_ERROR)
            }
        }
    }

    pub fn into_space_response(self) -> SpaceResponse {
        let status = self.status();
        SpaceResponse::json(status, &self.body())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}
