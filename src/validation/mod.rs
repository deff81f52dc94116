pub mod space;

pub use space::{
    sanitize_space, validate_complete_space, validate_id, validate_location, validate_photo_url,
    validate_space, validate_ward,
};

use crate::error::AppError;

/// Outcome of a validation pass: the ordered list of violated rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Appends the errors of `other`, keeping their order.
    pub fn absorb(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
    }

    /// Turns a failed result into a validation error carrying `message`.
    pub fn into_result(self, message: &str) -> Result<(), AppError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AppError::validation_with(message, self.errors))
        }
    }
}

/// 常用验证规则
pub mod rules {
    /// Longest accepted value for any Space field, in characters.
    pub const MAX_STRING_LENGTH: usize = 255;
    pub const MIN_STRING_LENGTH: usize = 1;

    pub fn char_len(value: &str) -> usize {
        value.chars().count()
    }

    /// `[A-Za-z0-9_-]+`
    pub fn is_id_charset(value: &str) -> bool {
        !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}
