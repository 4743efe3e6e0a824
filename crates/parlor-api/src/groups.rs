use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use parlor_types::api::{AddMemberRequest, SetGroupNameRequest};

use crate::auth::{AppState, authenticate};
use crate::error_status;

/// POST /groups/{groupId}/members — add a known user to a group.
pub async fn add_member(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .add_to_group(&name, group_id, &req.member_id)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /groups/{groupId}/leave — remove the caller from the group.
pub async fn leave_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .leave_group(&name, group_id)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /groups/{groupId}/name
pub async fn set_group_name(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<SetGroupNameRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .set_group_name(&name, group_id, &req.name)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
