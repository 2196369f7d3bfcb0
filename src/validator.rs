use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::utils::errors::AppError;

/// Flattens a [`ValidationErrors`] tree into a `field -> message` map,
/// using dotted paths for nested structs (e.g. `user.vat`).
pub fn validation_error_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    collect_errors("", errors, &mut map);
    map
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path));
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_errors(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

/// JSON extractor that runs `validator` on the deserialized value and rejects
/// with the per-field error map.
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
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::invalid_argument(format!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::invalid_argument("Invalid field type in request");
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::invalid_argument(
                        "Missing 'Content-Type: application/json' header",
                    );
                }

                AppError::invalid_argument("Invalid request body")
            })?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(validation_error_map(&errors)))?;

        Ok(ValidatedJson(value))
    }
}
