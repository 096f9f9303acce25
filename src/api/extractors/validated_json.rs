//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use pr_reviewer::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct MergeRequest {
///     #[validate(length(min = 1))]
///     pull_request_id: String,
/// }
///
/// async fn merge(ValidatedJson(payload): ValidatedJson<MergeRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string
pub(super) fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| flatten_errors(field, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collect messages from a field, descending into nested structs and lists
fn flatten_errors(field: &str, kind: &validator::ValidationErrorsKind) -> Vec<String> {
    use validator::ValidationErrorsKind;

    match kind {
        ValidationErrorsKind::Field(errs) => errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect(),
        ValidationErrorsKind::Struct(inner) => vec![format_validation_errors(inner)],
        ValidationErrorsKind::List(items) => items
            .values()
            .map(|inner| format_validation_errors(inner))
            .collect(),
    }
}
