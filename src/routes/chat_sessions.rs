//! # 채팅 세션 API 라우트 핸들러
//!
//! 인증된 사용자의 채팅 세션을 조회하고 생성하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/chat-sessions | `list_chat_sessions` | 내 세션 목록 (메시지 포함) |
//! | POST | /api/chat-sessions | `create_chat_session` | 새 세션 생성 |
//! | GET | /api/chat-sessions/{id} | `get_chat_session` | 세션 하나 (메시지 포함) |
//! | POST | /api/chat-sessions/{id}/messages | `create_chat_message` | 세션에 메시지 추가 |
//! | 그 외 | 위 경로들 | `method_not_allowed` | 405 |
//!
//! 세션 수정/삭제 API는 없습니다. PUT, PATCH, DELETE는 모두 405로 응답합니다.
//!
//! ## 인증
//! 모든 핸들러가 `AuthUser` Extractor를 받습니다. 토큰이 없거나 잘못되면
//! 핸들러 본문이 실행되기 전에 401이 반환됩니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::parse_body,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::{json, Value};

/// `GET /api/chat-sessions` → `{ "sessions": [...] }`
///
/// 최근에 갱신된 세션이 먼저 오도록 `updated_at` 내림차순으로 정렬되고,
/// 각 세션의 `messages`는 생성 순서대로 들어 있습니다.
/// 세션이 없으면 빈 배열과 함께 200을 반환합니다.
pub async fn list_chat_sessions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let sessions = db::list_sessions_with_messages(&state.pool, &auth_user.user_id).await?;
    tracing::debug!(
        user_id = %auth_user.user_id,
        count = sessions.len(),
        "Listed chat sessions"
    );
    Ok(Json(json!({ "sessions": sessions })))
}

/// `POST /api/chat-sessions` + `{ "title"?: "...", "document_id"?: "..." }`
/// → `201 { "session": {...} }`
///
/// ## 매개변수 처리
/// - 본문이 비어 있으면 두 필드 모두 없는 것으로 처리합니다.
/// - `title`이 없거나 빈 문자열이면 "New Chat"을 사용합니다.
/// - `document_id`가 없거나 빈 문자열이면 null로 저장합니다.
///
/// `Json<T>` Extractor 대신 `Bytes`를 받는 이유: 본문 없이 보내는 요청도
/// 정상 요청이기 때문입니다. `Json<T>`은 빈 본문이나 Content-Type 누락을 거부합니다.
pub async fn create_chat_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let req: CreateChatSessionRequest = parse_body(&body)?.unwrap_or_default();

    let session = db::create_session(
        &state.pool,
        &auth_user.user_id,
        req.title_or_default(),
        req.document_id(),
    )
    .await?;

    tracing::info!(
        user_id = %auth_user.user_id,
        session_id = %session.id,
        "Created chat session"
    );
    Ok((StatusCode::CREATED, Json(json!({ "session": session }))))
}

/// `GET /api/chat-sessions/{id}` → `{ "session": { ..., "messages": [...] } }`
///
/// 다른 사용자의 세션이면 존재하지 않는 것과 똑같이 404를 반환합니다.
pub async fn get_chat_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = db::get_session_with_messages(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(json!({ "session": session })))
}

/// `POST /api/chat-sessions/{id}/messages` + `{ "role": "user", "content": "..." }`
/// → `201 { "message": {...} }`
///
/// 메시지가 추가되면 세션의 `updated_at`도 함께 갱신되어
/// 목록에서 이 세션이 맨 위로 올라갑니다.
pub async fn create_chat_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let req: CreateMessageRequest = parse_body(&body)?
        .ok_or_else(|| AppError::BadRequest("Request body is required".to_string()))?;

    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("Message content must not be empty".to_string()));
    }

    let message = db::append_message(
        &state.pool,
        &id,
        &auth_user.user_id,
        req.role,
        &req.content,
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

/// 라우트에 등록되지 않은 HTTP 메서드에 대한 fallback 핸들러
///
/// `MethodRouter::fallback()`에 등록되어, 같은 경로의 다른 메서드 요청을 받습니다.
/// `AppError`가 `IntoResponse`를 구현하므로 에러 자체를 그대로 반환할 수 있습니다.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}
