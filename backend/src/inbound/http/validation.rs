//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes `400 invalid_request` with `details.field` naming
//! the offending input and `details.code` a stable machine code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, OfferPriceFilter, OfferPriceFilterError, PhoneNumber};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidPhoneNumber,
    InvalidDate,
    InvertedDateRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPhoneNumber => "invalid_phone_number",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvertedDateRange => "inverted_date_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn validation_error(field: &str, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn validation_error_with_value(
    field: &str,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a UUID from a path segment or body field.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    let field = field.as_str();
    Uuid::parse_str(value.trim()).map_err(|_| {
        validation_error_with_value(
            field,
            format!("{field} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_phone_number(value: &str, field: FieldName) -> Result<PhoneNumber, Error> {
    let field = field.as_str();
    PhoneNumber::new(value).map_err(|error| {
        validation_error_with_value(
            field,
            error.to_string(),
            ErrorCode::InvalidPhoneNumber,
            value,
        )
    })
}

/// Parse the optional `title`, `start_date` and `end_date` query parameters.
pub(crate) fn parse_offer_price_filter(
    title: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<OfferPriceFilter, Error> {
    OfferPriceFilter::parse(title, start_date, end_date).map_err(|error| {
        let code = match error {
            OfferPriceFilterError::InvalidDate { .. } => ErrorCode::InvalidDate,
            OfferPriceFilterError::InvertedRange => ErrorCode::InvertedDateRange,
        };
        validation_error(error.field(), error.to_string(), code)
    })
}
