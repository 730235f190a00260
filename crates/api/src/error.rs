use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    FieldValidation(Vec<ValidationDetail>),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

/// One field-level failure in the error envelope's `details` array.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg, None),
            ApiError::FieldValidation(details) => {
                let message = match details.as_slice() {
                    [single] => format!("{}: {}", single.field, single.message),
                    many => format!("{} validation errors", many.len()),
                };
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    message,
                    Some(details),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Flatten a validator error tree into dotted field paths, so a failure
/// inside an embedded block reads as `location.latitude`.
fn collect_details(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<ValidationDetail>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    out.push(ValidationDetail {
                        field: path.clone(),
                        message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_details(&path, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_details(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_details("", &errors, &mut details);

        // errors() iterates a HashMap; sort for stable responses
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::FieldValidation(details)
    }
}

impl From<domain::services::OwnershipError> for ApiError {
    fn from(err: domain::services::OwnershipError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_unauthorized() {
        let error = ApiError::Unauthorized("test message".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_error_forbidden() {
        let error = ApiError::Forbidden("access denied".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::NotFound("resource not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_conflict() {
        let error = ApiError::Conflict("already exists".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_api_error_validation() {
        let error = ApiError::Validation("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("database connection failed".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Unauthorized("test".to_string())),
            "Unauthorized: test"
        );
        assert_eq!(
            format!("{}", ApiError::NotFound("test".to_string())),
            "Not found: test"
        );
        assert_eq!(
            format!("{}", ApiError::Validation("test".to_string())),
            "Validation error: test"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_ownership_error() {
        let err = domain::services::OwnershipError::SumNotComplete(80.0);
        let error: ApiError = err.into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_validation_errors_nested_paths() {
        use validator::Validate;

        #[derive(Validate)]
        struct Coordinates {
            #[validate(range(min = -90.0, max = 90.0, message = "out of range"))]
            latitude: f64,
        }

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, message = "must not be empty"))]
            title: String,
            #[validate(nested)]
            location: Coordinates,
        }

        let payload = Payload {
            title: String::new(),
            location: Coordinates { latitude: 999.0 },
        };

        let error: ApiError = payload.validate().unwrap_err().into();
        match error {
            ApiError::FieldValidation(details) => {
                assert_eq!(details.len(), 2);
                // Sorted by field path
                assert_eq!(details[0].field, "location.latitude");
                assert_eq!(details[0].message, "out of range");
                assert_eq!(details[1].field, "title");
            }
            other => panic!("Expected field validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_field_validation_details_in_body() {
        let error = ApiError::FieldValidation(vec![ValidationDetail {
            field: "location.latitude".into(),
            message: "Latitude must be between -90 and 90".into(),
        }]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(
            body["message"],
            "location.latitude: Latitude must be between -90 and 90"
        );
        assert_eq!(body["details"][0]["field"], "location.latitude");
    }

    #[tokio::test]
    async fn test_plain_validation_error_omits_details() {
        let response = ApiError::Validation("Patch contains no fields".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.get("details").is_none());
    }
}
