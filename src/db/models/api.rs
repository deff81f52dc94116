use serde::Serialize;

use super::space::Space;

// 统一的错误/消息响应体
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SpaceCreated {
    pub message: String,
    pub space_id: String,
    pub space: Space,
}

#[derive(Serialize, Debug)]
pub struct HealthStatus {
    pub status: &'static str,
}

// 便捷构造函数
impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            missing_fields: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
            missing_fields: None,
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self {
            message: messages::MISSING_FIELDS.to_string(),
            errors: None,
            missing_fields: Some(fields),
        }
    }
}

impl SpaceCreated {
    pub fn new(space: Space) -> Self {
        Self {
            message: messages::SPACE_CREATED.to_string(),
            space_id: space.id.clone(),
            space,
        }
    }
}

// Messages clients match on; keep them stable.
pub mod messages {
    pub const BODY_REQUIRED: &str = "Request body is required";
    pub const INVALID_JSON: &str = "Invalid JSON in request body";
    pub const MISSING_FIELDS: &str = "Missing required fields";
    pub const VALIDATION_FAILED: &str = "Validation failed";
    pub const INVALID_ID: &str = "Invalid space ID format";
    pub const ID_REQUIRED: &str = "Space ID is required";
    pub const ID_REQUIRED_IN_QUERY: &str = "Space ID is required in query parameters";
    pub const NO_UPDATABLE_ATTRIBUTE: &str = "Request body must contain at least one valid attribute to update (location, ward, photoUrl)";
    pub const SPACE_NOT_FOUND: &str = "Space not found";
    pub const SPACE_CREATED: &str = "Space created successfully";
    pub const FORBIDDEN: &str = "Forbidden";
    pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
    pub const INTERNAL_ERROR: &str = "Internal Server Error";
    /// Read and create report store failures with this spelling.
    pub const INTERNAL_ERROR_LOWER: &str = "Internal server error";
    pub const CONFIGURATION_ERROR: &str = "Configuration error";

    pub fn space_deleted(id: &str) -> String {
        format!("Space with id {} deleted successfully", id)
    }
}
