use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use parlor_types::api::{
    CommentRequest, ForwardRequest, MessageCreatedResponse, SendMessageRequest,
};

use crate::auth::{AppState, authenticate};
use crate::error_status;

/// POST /messages — send into an existing conversation, or start a new one
/// when no conversationId is supplied.
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    let (conversation_id, message_id) = state
        .store
        .send_message(&name, req.conversation_id, &req.text, req.is_group)
        .map_err(error_status)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageCreatedResponse { conversation_id, message_id }),
    ))
}

/// DELETE /messages/{messageId} — soft-delete.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .delete_message(&name, message_id)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /messages/{messageId}/comment
pub async fn comment_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .comment_message(&name, message_id, &req.comment)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /messages/{messageId}/comment
pub async fn uncomment_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    state
        .store
        .uncomment_message(&name, message_id)
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /messages/{messageId}/forward — copy a message into another
/// conversation the caller belongs to.
pub async fn forward_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<ForwardRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    let (conversation_id, message_id) = state
        .store
        .forward_message(&name, message_id, req.conversation_id)
        .map_err(error_status)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageCreatedResponse { conversation_id, message_id }),
    ))
}
