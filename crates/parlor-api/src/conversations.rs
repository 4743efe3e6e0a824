use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use parlor_core::Message;
use parlor_types::api::{ConversationResponse, MessagePayload};

use crate::auth::{AppState, authenticate};
use crate::error_status;

pub(crate) fn message_payload(message: Message) -> MessagePayload {
    MessagePayload {
        id: message.id,
        conversation_id: message.conversation_id,
        sender: message.sender,
        text: message.text,
        created_at: message.created_at,
        deleted: message.deleted,
        comment: message.comment,
        commented_at: message.commented_at,
        forwarded_from: message.forwarded_from,
    }
}

/// GET /conversations — ids of the caller's conversations, oldest first.
pub async fn get_my_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    let ids = state.store.list_conversations(&name).map_err(error_status)?;
    Ok(Json(ids))
}

/// GET /conversations/{conversationId} — full message history, soft-deleted
/// entries included.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let name = authenticate(&state, &headers)?;
    let conversation = state
        .store
        .get_conversation(&name, conversation_id)
        .map_err(error_status)?;

    Ok(Json(ConversationResponse {
        conversation_id: conversation.id,
        messages: conversation.messages.into_iter().map(message_payload).collect(),
    }))
}
