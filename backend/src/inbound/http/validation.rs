//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field failures become `invalid_request` errors whose details name the
//! offending JSON field and a stable machine-readable code.

use serde_json::json;

use crate::domain::{Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    Blank,
    TooShort,
    TooLong,
    InvalidCharacters,
    InvalidEmail,
    OutOfRange,
    InvalidPhoneNumber,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::Blank => "blank",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidCharacters => "invalid_characters",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidPhoneNumber => "invalid_phone_number",
        }
    }
}

impl From<&UserValidationError> for ErrorCode {
    fn from(error: &UserValidationError) -> Self {
        match error {
            UserValidationError::EmptyName | UserValidationError::EmptyEmail => Self::Blank,
            UserValidationError::NameTooShort { .. } => Self::TooShort,
            UserValidationError::NameTooLong { .. } => Self::TooLong,
            UserValidationError::NameInvalidCharacters => Self::InvalidCharacters,
            UserValidationError::InvalidEmail => Self::InvalidEmail,
            UserValidationError::AgeOutOfRange { .. } => Self::OutOfRange,
            UserValidationError::InvalidPhoneNumber => Self::InvalidPhoneNumber,
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_field_error(field: FieldName, error: &UserValidationError) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field}: {error}")).with_code(ErrorCode::from(error))
}

/// Require `value` to be present, then run it through `parse`.
pub(crate) fn parse_required<T, V>(
    value: Option<V>,
    field: FieldName,
    parse: impl FnOnce(V) -> Result<T, UserValidationError>,
) -> Result<T, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse(raw).map_err(|error| invalid_field_error(field, &error))
}

/// Run `parse` over `value` when present.
pub(crate) fn parse_optional<T, V>(
    value: Option<V>,
    field: FieldName,
    parse: impl FnOnce(V) -> Result<T, UserValidationError>,
) -> Result<Option<T>, Error> {
    value
        .map(|raw| parse(raw).map_err(|error| invalid_field_error(field, &error)))
        .transpose()
}
