use axum::{
    Json,
    http::{Method, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::net::SocketAddr;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BackendError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extension already registered: {0}")]
    ExtensionAlreadyRegistered(&'static str),

    #[error("Missing extension: {0}")]
    MissingExtension(&'static str),

    #[error("No tokio runtime available to drive the database pool")]
    MissingRuntime,

    #[error("No route matches {method} {path}")]
    RouteNotFound {
        method: Method,
        path: String,
        verbose: bool,
    },
}

const NOT_FOUND_MESSAGE: &str = "The requested URL was not found on the server. \
     If you entered the URL manually please check your spelling and try again.";

impl IntoResponse for BackendError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            BackendError::RouteNotFound {
                method,
                path,
                verbose,
            } => {
                let message = if verbose {
                    format!("No route matches {method} {path}")
                } else {
                    NOT_FOUND_MESSAGE.to_string()
                };
                (
                    StatusCode::NOT_FOUND,
                    ApiErrorBody {
                        code: "NOT_FOUND".to_string(),
                        message,
                    },
                )
            }
            BackendError::Config(_)
            | BackendError::Database(_)
            | BackendError::Bind { .. }
            | BackendError::Io(_)
            | BackendError::ExtensionAlreadyRegistered(_)
            | BackendError::MissingExtension(_)
            | BackendError::MissingRuntime => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: BackendError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, serde_json::from_slice(&bytes).expect("body was not json"))
    }

    #[tokio::test]
    async fn verbose_not_found_names_method_and_path() {
        let (status, body) = body_json(BackendError::RouteNotFound {
            method: Method::POST,
            path: "/login".to_string(),
            verbose: true,
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "No route matches POST /login");
    }

    #[tokio::test]
    async fn quiet_not_found_hides_path() {
        let (status, body) = body_json(BackendError::RouteNotFound {
            method: Method::GET,
            path: "/secret".to_string(),
            verbose: false,
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("/secret"));
        assert!(message.starts_with("The requested URL was not found"));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) = body_json(BackendError::MissingExtension("database")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("database"));
    }
}
