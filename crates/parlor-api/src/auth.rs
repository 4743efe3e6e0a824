use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use parlor_core::Store;
use parlor_types::api::{LoginRequest, LoginResponse, SetNameRequest};

use crate::error_status;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
}

/// Extract the bearer token from the Authorization header and resolve it to
/// the caller's display name. Missing or malformed headers read the same as
/// an unknown token.
pub(crate) fn authenticate(state: &AppStateInner, headers: &HeaderMap) -> Result<String, StatusCode> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    state.store.authenticate(token).map_err(error_status)
}

/// POST /session — create-or-reuse login. The returned identifier is the
/// bearer token for every other endpoint.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let identifier = state.store.login(&req.name).map_err(error_status)?;
    Ok((StatusCode::CREATED, Json(LoginResponse { identifier })))
}

/// PUT /me/name — rename the authenticated user.
pub async fn set_my_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetNameRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .rename_user(&name, &req.name)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
