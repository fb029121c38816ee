//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose
//! `details` name the offending field and a stable code.

use actix_web::web;
use serde_json::json;

use crate::domain::{BlogId, BlogValidationError, Error, RegistrationValidationError};

/// Message returned for path ids that are not UUIDs.
pub const MALFORMED_ID_MESSAGE: &str = "malformatted id";

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    NegativeValue,
    OutOfRange,
    TooShort,
    TooLong,
    InvalidJson,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::NegativeValue => "negative_value",
            Self::OutOfRange => "out_of_range",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidJson => "invalid_json",
        }
    }
}

fn field_error(message: impl Into<String>, field: &str, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn blog_draft_error(err: BlogValidationError) -> Error {
    let message = err.to_string();
    match err {
        BlogValidationError::MissingField(field) => {
            field_error(message, field.as_str(), ValidationCode::MissingField)
        }
        BlogValidationError::NegativeLikes => {
            field_error(message, "likes", ValidationCode::NegativeValue)
        }
        BlogValidationError::LikesOutOfRange { .. } => {
            field_error(message, "likes", ValidationCode::OutOfRange)
        }
        BlogValidationError::InvalidId => field_error(message, "id", ValidationCode::InvalidUuid),
    }
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::TooShort => {
            Error::invalid_request(message).with_details(json!({
                "fields": ["username", "password"],
                "code": ValidationCode::TooShort.as_str(),
            }))
        }
        RegistrationValidationError::UsernameTooLong { .. } => {
            field_error(message, "username", ValidationCode::TooLong)
        }
        RegistrationValidationError::NameTooLong { .. } => {
            field_error(message, "name", ValidationCode::TooLong)
        }
    }
}

pub(crate) fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::new(raw).map_err(|_| {
        Error::invalid_request(MALFORMED_ID_MESSAGE).with_details(json!({
            "field": "id",
            "value": raw,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

/// JSON extractor configuration rendering body errors as the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        field_error(
            format!("invalid JSON body: {err}"),
            "body",
            ValidationCode::InvalidJson,
        )
        .into()
    })
}
