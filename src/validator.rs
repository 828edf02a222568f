//! JSON extraction with DTO validation.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use sociograph_core::AppError;

/// Extractor that deserializes a JSON body and runs its `validator` rules,
/// turning both failure kinds into the API's error shape: malformed bodies
/// are 400s, rule violations are 422s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::new(StatusCode::BAD_REQUEST, body_error(&rejection)))?;

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", flatten_errors(&errors)),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Maps a Json rejection onto a client-actionable message. Serde's text is
/// the only place the offending field name survives, hence the sniffing.
fn body_error(rejection: &JsonRejection) -> anyhow::Error {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return anyhow!("Missing 'Content-Type: application/json' header");
    }

    let detail = rejection.body_text();
    if let Some(rest) = detail.split("missing field `").nth(1)
        && let Some(field) = rest.split('`').next()
    {
        return anyhow!("{} is required", field);
    }
    if detail.contains("invalid type") {
        return anyhow!("Invalid field type in request");
    }

    anyhow!("Invalid request body")
}

fn flatten_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
