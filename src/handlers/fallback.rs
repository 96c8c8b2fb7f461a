use axum::{
    extract::State,
    http::{Method, Uri},
};

use crate::{BackendError, app::AppState};

/// Answers every request: no routes are registered.
pub async fn not_found(State(state): State<AppState>, method: Method, uri: Uri) -> BackendError {
    BackendError::RouteNotFound {
        method,
        path: uri.path().to_string(),
        verbose: state.debug,
    }
}
