use std::sync::LazyLock;

use regex::Regex;

use super::ValidationResult;
use super::rules::{MAX_STRING_LENGTH, MIN_STRING_LENGTH, char_len, is_id_charset};
use crate::db::models::space::SpaceDraft;

static PHOTO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)(\?.*)?$")
        .expect("photo url pattern is valid")
});

fn missing(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

pub fn validate_id(id: Option<&str>) -> ValidationResult {
    let Some(id) = id.filter(|v| !v.is_empty()) else {
        return ValidationResult::from_errors(vec![
            "ID is required and must be a string".to_string(),
        ]);
    };

    let mut errors = Vec::new();
    if id.trim().is_empty() {
        errors.push("ID cannot be empty".to_string());
    }
    if char_len(id) > MAX_STRING_LENGTH {
        errors.push(format!("ID must be less than {} characters", MAX_STRING_LENGTH));
    }
    if !is_id_charset(id) {
        errors.push("ID can only contain letters, numbers, hyphens, and underscores".to_string());
    }
    ValidationResult::from_errors(errors)
}

/// Shared rule for the free-text fields (`location`, `ward`).
fn validate_text(label: &str, value: Option<&str>) -> ValidationResult {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return ValidationResult::from_errors(vec![format!(
            "{} is required and must be a string",
            label
        )]);
    };

    let trimmed = value.trim();
    let mut errors = Vec::new();
    if char_len(trimmed) < MIN_STRING_LENGTH {
        errors.push(format!("{} cannot be empty", label));
    }
    if char_len(trimmed) > MAX_STRING_LENGTH {
        errors.push(format!(
            "{} must be less than {} characters",
            label, MAX_STRING_LENGTH
        ));
    }
    ValidationResult::from_errors(errors)
}

pub fn validate_location(location: Option<&str>) -> ValidationResult {
    validate_text("Location", location)
}

pub fn validate_ward(ward: Option<&str>) -> ValidationResult {
    validate_text("Ward", ward)
}

/// `photoUrl` is optional: a missing or blank value is valid.
pub fn validate_photo_url(photo_url: Option<&str>) -> ValidationResult {
    let Some(trimmed) = photo_url.map(str::trim).filter(|v| !v.is_empty()) else {
        return ValidationResult::valid();
    };

    let mut errors = Vec::new();
    if char_len(trimmed) > MAX_STRING_LENGTH {
        errors.push(format!(
            "Photo URL must be less than {} characters",
            MAX_STRING_LENGTH
        ));
    }
    if !PHOTO_URL_REGEX.is_match(trimmed) {
        errors.push(
            "Photo URL must be a valid HTTP/HTTPS URL pointing to an image file (jpg, jpeg, png, gif, webp)"
                .to_string(),
        );
    }
    ValidationResult::from_errors(errors)
}

/// Checks only the fields present in `space`. Used for partial updates.
pub fn validate_space(space: &SpaceDraft) -> ValidationResult {
    let mut result = ValidationResult::valid();
    if let Some(ref id) = space.id {
        result.absorb(validate_id(Some(id)));
    }
    if let Some(ref location) = space.location {
        result.absorb(validate_location(Some(location)));
    }
    if let Some(ref ward) = space.ward {
        result.absorb(validate_ward(Some(ward)));
    }
    if let Some(ref photo_url) = space.photo_url {
        result.absorb(validate_photo_url(Some(photo_url)));
    }
    result
}

/// Requires `id`, `location` and `ward`; `photoUrl` is checked when present.
pub fn validate_complete_space(space: &SpaceDraft) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let required = [
        ("ID", space.id.as_deref(), validate_id as fn(Option<&str>) -> ValidationResult),
        ("Location", space.location.as_deref(), validate_location),
        ("Ward", space.ward.as_deref(), validate_ward),
    ];
    for (label, value, check) in required {
        if missing(value) {
            result.absorb(ValidationResult::from_errors(vec![format!(
                "{} is required",
                label
            )]));
        } else {
            result.absorb(check(value));
        }
    }

    result.absorb(validate_photo_url(space.photo_url.as_deref()));
    result
}

/// Trims every present field; absent fields stay absent. A blank `photoUrl`
/// is dropped, but a blank `id`, `location` or `ward` is kept as `""` rather
/// than omitted, so validation rejects it as empty instead of the update
/// silently skipping it. Applying it twice gives the same draft as applying
/// it once.
pub fn sanitize_space(space: &SpaceDraft) -> SpaceDraft {
    let trim = |value: &Option<String>| value.as_deref().map(|v| v.trim().to_string());

    SpaceDraft {
        id: trim(&space.id),
        location: trim(&space.location),
        ward: trim(&space.ward),
        photo_url: trim(&space.photo_url).filter(|v| !v.is_empty()),
    }
}
