//! Request extractors that reject with the API's JSON error body

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request, rejection::JsonRejection},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::application::errors::ApplicationError;

/// Fields of a request type in declaration order.
///
/// When several fields fail, the reported message belongs to the one
/// declared first. Fields missing from the list sort after it by name.
pub trait FieldOrder {
    const FIELD_ORDER: &'static [&'static str];
}

/// Validation keys may be snake_case or the camelCase wire name
fn same_field(reported: &str, declared: &str) -> bool {
    let normalize = |name: &str| -> String {
        name.chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    normalize(reported) == normalize(declared)
}

/// Message of the first failing rule of the first failing field
fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| {
        let rank = order
            .iter()
            .position(|declared| same_field(field, declared))
            .unwrap_or(order.len());
        (rank, field.to_string())
    });

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

fn check<T: Validate + FieldOrder>(value: &T) -> Result<(), ApplicationError> {
    value
        .validate()
        .map_err(|errors| ApplicationError::validation(first_message(&errors, T::FIELD_ORDER)))
}

/// JSON body that has passed its `validator` rules.
///
/// The body is parsed to a [`Value`] first, so a field deserializer's own
/// error text reaches the client without serde's path and position suffix.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        let value: T = serde_json::from_value(raw)
            .map_err(|err| ApplicationError::validation(err.to_string()))?;
        check(&value)?;
        Ok(ValidatedJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApplicationError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => ApplicationError::validation("Invalid JSON payload"),
        JsonRejection::MissingJsonContentType(_) => {
            ApplicationError::validation("Expected request with `Content-Type: application/json`")
        }
        JsonRejection::BytesRejection(_) => {
            ApplicationError::validation("Request body is too large or unreadable")
        }
        other => ApplicationError::validation(other.body_text()),
    }
}

/// Query string that has passed its `validator` rules
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApplicationError::validation(rejection.body_text()))?;
        check(&value)?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameters; a malformed segment is a 400 rather than axum's plain-text reply
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApplicationError::validation("Invalid path parameter"))?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(range(min = 1, message = "zone is too small"))]
        zone: i64,
        #[validate(length(min = 3, message = "alias is too short"))]
        alias: String,
        #[validate(length(min = 3, message = "extra is too short"))]
        extra: String,
    }

    impl FieldOrder for Sample {
        const FIELD_ORDER: &'static [&'static str] = &["zone", "alias"];
    }

    #[test]
    fn reports_first_declared_field() {
        let sample = Sample {
            zone: 0,
            alias: "x".to_string(),
            extra: "x".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(first_message(&errors, Sample::FIELD_ORDER), "zone is too small");
    }

    #[test]
    fn unlisted_fields_follow_in_name_order() {
        let sample = Sample {
            zone: 5,
            alias: "long enough".to_string(),
            extra: "x".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(first_message(&errors, &[]), "extra is too short");
        assert_eq!(
            first_message(&errors, Sample::FIELD_ORDER),
            "extra is too short"
        );
    }

    #[test]
    fn wire_names_match_field_names() {
        assert!(same_field("booking_date", "bookingDate"));
        assert!(same_field("package_id", "package_id"));
        assert!(!same_field("page", "package_id"));
    }

    #[test]
    fn passing_rules_are_ok() {
        let sample = Sample {
            zone: 4,
            alias: "long enough".to_string(),
            extra: "also fine".to_string(),
        };
        assert!(check(&sample).is_ok());
    }
}
