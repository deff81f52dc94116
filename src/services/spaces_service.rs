use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::models::{
        api::{MessageBody, SpaceCreated, messages},
        space::{FIELD_LOCATION, FIELD_PHOTO_URL, FIELD_WARD, SpaceDraft},
    },
    db::repositories::SpaceStore,
    error::{AppError, AppResult},
    middleware::auth::has_admin_group,
    services::context::{QueryId, SpaceRequest, SpaceResponse},
    validation::{sanitize_space, validate_complete_space, validate_id, validate_space},
};

/// Fields a create request must carry.
const REQUIRED_FIELDS: [&str; 2] = [FIELD_LOCATION, FIELD_WARD];

pub struct SpacesService;

impl SpacesService {
    /// `POST`: creates a Space under a freshly generated id.
    pub async fn create(req: &SpaceRequest, store: &dyn SpaceStore) -> AppResult<SpaceResponse> {
        let body = parse_body(req)?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !is_truthy(body.get(**field)))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields { fields: missing });
        }

        // The id is always server generated; a client supplied one is ignored.
        let string_field = |name: &str| body.get(name).and_then(Value::as_str).map(String::from);
        let candidate = SpaceDraft {
            id: Some(Uuid::new_v4().to_string()),
            location: string_field(FIELD_LOCATION),
            ward: string_field(FIELD_WARD),
            photo_url: string_field(FIELD_PHOTO_URL),
        };

        let sanitized = sanitize_space(&candidate);
        validate_complete_space(&sanitized).into_result(messages::VALIDATION_FAILED)?;
        let space = sanitized
            .into_space()
            .ok_or_else(|| AppError::internal("validated space is incomplete"))?;

        store
            .put(&space)
            .await
            .map_err(AppError::store(messages::INTERNAL_ERROR_LOWER))?;
        tracing::info!(space_id = %space.id, "Space created");

        Ok(SpaceResponse::json(
            StatusCode::CREATED,
            &SpaceCreated::new(space),
        ))
    }

    /// `GET`: one Space by `?id=`, or every Space when no id is given.
    pub async fn read(req: &SpaceRequest, store: &dyn SpaceStore) -> AppResult<SpaceResponse> {
        let QueryId::Present(id) = req.id() else {
            let items = store
                .scan()
                .await
                .map_err(AppError::store(messages::INTERNAL_ERROR_LOWER))?;
            return Ok(SpaceResponse::json(StatusCode::OK, &items));
        };

        validate_id(Some(id)).into_result(messages::INVALID_ID)?;

        let item = store
            .get(id)
            .await
            .map_err(AppError::store(messages::INTERNAL_ERROR_LOWER))?
            .ok_or_else(|| AppError::not_found(messages::SPACE_NOT_FOUND))?;

        Ok(SpaceResponse::json(StatusCode::OK, &item))
    }

    /// `PUT`: changes `location`, `ward` and/or `photoUrl` of `?id=`.
    pub async fn update(req: &SpaceRequest, store: &dyn SpaceStore) -> AppResult<SpaceResponse> {
        let id = required_id(req)?;
        let body = parse_body(req)?;

        let changes = SpaceDraft::from_update_body(&body);
        if changes.is_empty() {
            return Err(AppError::validation(messages::NO_UPDATABLE_ATTRIBUTE));
        }

        let sanitized = sanitize_space(&changes);
        validate_space(&sanitized).into_result(messages::VALIDATION_FAILED)?;

        let item = store
            .update(id, &sanitized)
            .await
            .map_err(AppError::store(messages::INTERNAL_ERROR))?;
        tracing::info!(space_id = %id, "Space updated");

        Ok(SpaceResponse::json(StatusCode::OK, &item))
    }

    /// `DELETE`: admin only; removes `?id=` without checking it exists.
    pub async fn delete(req: &SpaceRequest, store: &dyn SpaceStore) -> AppResult<SpaceResponse> {
        if !has_admin_group(req) {
            return Err(AppError::Forbidden);
        }

        let id = required_id(req)?;

        store
            .delete(id)
            .await
            .map_err(AppError::store(messages::INTERNAL_ERROR))?;
        tracing::info!(space_id = %id, "Space deleted");

        Ok(SpaceResponse::json(
            StatusCode::OK,
            &MessageBody::new(messages::space_deleted(id)),
        ))
    }
}

/// The `?id=` of update and delete: the key must exist, be non-empty and be
/// a well-formed id.
fn required_id(req: &SpaceRequest) -> AppResult<&str> {
    let id = match req.id() {
        QueryId::Absent => return Err(AppError::validation(messages::ID_REQUIRED_IN_QUERY)),
        QueryId::Empty => return Err(AppError::validation(messages::ID_REQUIRED)),
        QueryId::Present(id) => id,
    };
    validate_id(Some(id)).into_result(messages::INVALID_ID)?;
    Ok(id)
}

fn parse_body(req: &SpaceRequest) -> AppResult<Value> {
    if req.undecodable_body {
        return Err(AppError::validation(messages::INVALID_JSON));
    }
    let raw = req
        .body()
        .ok_or_else(|| AppError::validation(messages::BODY_REQUIRED))?;
    serde_json::from_str(raw).map_err(|_| AppError::validation(messages::INVALID_JSON))
}

/// JSON truthiness: absent, `null`, `false`, `0` and `""` count as missing.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
