//! # 채팅 세션 데이터베이스 쿼리 모듈
//!
//! 채팅 세션의 생성/조회와 메시지 추가를 담당하는 SQL 쿼리 함수들입니다.
//!
//! 모든 조회 함수는 `user_id`를 함께 받습니다. `WHERE user_id = ?` 조건이
//! 항상 붙기 때문에 다른 사용자의 세션은 쿼리 결과에 나타날 수 없습니다.
//!
//! ## 정렬 규칙
//! - 세션: `updated_at DESC` (같은 밀리초면 나중에 삽입된 행이 먼저)
//! - 메시지: `created_at ASC` (같은 밀리초면 먼저 삽입된 행이 먼저)
//!
//! SQLite의 암묵적 `rowid`는 삽입 순서대로 증가하므로 동점 처리에 사용합니다.

use std::collections::HashMap;

use crate::db::now_timestamp;
use crate::error::AppError;
use crate::models::{ChatMessage, ChatSession, ChatSessionWithMessages, MessageRole};
use sqlx::SqlitePool;

/// 사용자의 모든 세션을 메시지와 함께 최신순으로 조회합니다.
///
/// 세션 수만큼 메시지 쿼리를 반복(N+1)하지 않고, 쿼리 두 번으로 끝냅니다:
/// 1. 사용자의 세션 목록
/// 2. 그 세션들에 속한 모든 메시지 (JOIN으로 같은 사용자 조건 적용)
///
/// 세션이 하나도 없으면 빈 Vec을 반환합니다 (에러가 아님).
pub async fn list_sessions_with_messages(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<ChatSessionWithMessages>, AppError> {
    let sessions = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, user_id, title, document_id, created_at, updated_at
        FROM chat_sessions
        WHERE user_id = ?
        ORDER BY updated_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT m.id, m.session_id, m.role, m.content, m.created_at
        FROM chat_messages m
        JOIN chat_sessions s ON s.id = m.session_id
        WHERE s.user_id = ?
        ORDER BY m.created_at ASC, m.rowid ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    // session_id → 메시지 목록. 쿼리가 이미 정렬되어 있으므로 push 순서가 곧 생성 순서입니다.
    let mut by_session: HashMap<String, Vec<ChatMessage>> = HashMap::new();
    for message in messages {
        by_session
            .entry(message.session_id.clone())
            .or_default()
            .push(message);
    }

    Ok(sessions
        .into_iter()
        .map(|session| {
            let messages = by_session.remove(&session.id).unwrap_or_default();
            ChatSessionWithMessages { session, messages }
        })
        .collect())
}

/// 새 채팅 세션을 만듭니다.
///
/// `title`은 호출하는 쪽에서 기본값 처리를 마친 값이어야 합니다.
/// `document_id`가 None이면 SQL NULL로 저장됩니다.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
    document_id: Option<&str>,
) -> Result<ChatSession, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let now = now_timestamp();

    sqlx::query(
        r#"
        INSERT INTO chat_sessions (id, user_id, title, document_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(title)
    .bind(document_id)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_session(pool, &id, user_id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve created chat session".to_string(),
        ))
}

/// 사용자가 소유한 세션 하나를 조회합니다.
///
/// 세션이 없거나 다른 사용자의 것이면 `None`입니다.
pub async fn get_session(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<ChatSession>, AppError> {
    let session = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, user_id, title, document_id, created_at, updated_at
        FROM chat_sessions
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// 세션 하나를 메시지와 함께 조회합니다.
pub async fn get_session_with_messages(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<ChatSessionWithMessages>, AppError> {
    let Some(session) = get_session(pool, id, user_id).await? else {
        return Ok(None);
    };

    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, session_id, role, content, created_at
        FROM chat_messages
        WHERE session_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(&session.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ChatSessionWithMessages { session, messages }))
}

/// 세션에 메시지를 추가하고 세션의 `updated_at`을 갱신합니다.
///
/// 트랜잭션의 첫 문장이 소유자 조건이 붙은 UPDATE입니다. SQLite는 첫 문장이
/// 쓰기이면 곧바로 쓰기 잠금을 요청하고, 잠금을 얻지 못하면 busy timeout 동안
/// 기다립니다. 읽기로 시작한 트랜잭션은 쓰기로 승격할 때 기다리지 않고
/// `database is locked`로 실패하므로, 순서를 바꾸면 동시 추가가 깨집니다.
///
/// UPDATE가 0행이면 세션이 없거나 다른 사용자의 세션이므로 메시지를 넣지 않습니다.
/// 중간에 실패하면 트랜잭션이 drop되면서 자동으로 롤백됩니다.
///
/// ## 반환값
/// - `Ok(Some(ChatMessage))`: 추가 성공
/// - `Ok(None)`: 세션이 없거나 다른 사용자의 세션
pub async fn append_message(
    pool: &SqlitePool,
    session_id: &str,
    user_id: &str,
    role: MessageRole,
    content: &str,
) -> Result<Option<ChatMessage>, AppError> {
    let now = now_timestamp();
    let mut tx = pool.begin().await?;

    let touched = sqlx::query(
        "UPDATE chat_sessions SET updated_at = ? WHERE id = ? AND user_id = ?",
    )
    .bind(&now)
    .bind(session_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if touched.rows_affected() == 0 {
        return Ok(None);
    }

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO chat_messages (id, session_id, role, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(session_id)
    .bind(role.as_str())
    .bind(content)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(ChatMessage {
        id,
        session_id: session_id.to_string(),
        role: role.as_str().to_string(),
        content: content.to_string(),
        created_at: now,
    }))
}
