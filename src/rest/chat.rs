use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::extract::AppJson;
use super::{AppState, ErrorBody};
use crate::error::{require, Error};

#[derive(Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
}

#[utoipa::path(
    post,
    path = "/api/gemini/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Empty message", body = ErrorBody),
        (status = 502, description = "Chat backend failed", body = ErrorBody),
        (status = 503, description = "No API key configured", body = ErrorBody)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatReply>, Error> {
    require("message", &request.message)?;
    let response = state.chat.reply(&request.message).await?;
    info!(chars = response.len(), "chat reply");
    Ok(Json(ChatReply { response }))
}
