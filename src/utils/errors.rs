use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Error type returned by every handler and service.
///
/// Renders as `{"error": "..."}` for plain failures, or as a per-field
/// message map (`{"phone": ["This field may not be blank."]}`) for
/// validation failures, matching what API clients key on.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn method_not_allowed<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, err)
    }

    /// 400 carrying a single failing field.
    pub fn field(field: &str, message: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.to_string()]);
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!("{}: {}", field, message),
            fields: Some(fields),
        }
    }

    /// 400 from `validator` output, keyed by field name.
    pub fn validation(errors: ValidationErrors) -> Self {
        let fields: BTreeMap<String, Vec<String>> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "This field is invalid.".to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!("validation failed"),
            fields: Some(fields),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.fields {
            Some(fields) => (self.status, Json(fields)).into_response(),
            None => {
                let body = Json(json!({
                    "error": self.error.to_string()
                }));
                (self.status, body).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Maps a unique-constraint violation to a 400 keyed by the offending
/// field; anything else passes through as a 500. `constraints` pairs the
/// Postgres constraint name with the API field name.
pub fn map_unique_violation(err: sqlx::Error, constraints: &[(&str, &str)]) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        let constraint = db_err.constraint().unwrap_or_default();
        for (name, field) in constraints {
            if constraint == *name {
                return AppError::field(field, "This value must be unique.");
            }
        }
        return AppError::bad_request(anyhow::anyhow!("unique constraint violated"));
    }
    AppError::from(err)
}
