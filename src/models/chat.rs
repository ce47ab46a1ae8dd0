//! # 채팅 세션 / 메시지 모델 정의
//!
//! 사용자가 업로드한 OM(Offering Memorandum) 문서에 대해 질문을 주고받는
//! 대화 스레드를 표현하는 구조체들입니다.
//!
//! ## 관계
//! ```text
//! users 1 ── N chat_sessions 1 ── N chat_messages
//! ```
//! 세션 목록을 조회할 때는 각 세션 아래에 메시지가 생성 순서대로 중첩됩니다.

use serde::{Deserialize, Serialize};

/// 제목 없이 세션을 만들 때 사용하는 기본 제목
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// 채팅 세션 엔티티 — DB의 `chat_sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatSession {
    /// 세션 고유 식별자 (UUIDv7)
    pub id: String,
    /// 소유자 ID — 생성 후 변경되지 않습니다.
    pub user_id: String,
    /// 세션 제목 — DB에는 항상 값이 있습니다 (기본값 "New Chat").
    pub title: String,
    /// 연결된 업로드 문서 ID — 없으면 JSON에서 `null`
    pub document_id: Option<String>,
    pub created_at: String,
    /// 목록 정렬 키 (내림차순). 메시지가 추가될 때마다 갱신됩니다.
    pub updated_at: String,
}

/// 세션 안의 한 턴 — DB의 `chat_messages` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: String,
    /// 응답 JSON에서는 부모 세션 아래에 중첩되므로 직렬화하지 않습니다.
    #[serde(skip_serializing)]
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

/// 메시지를 중첩한 세션 — `GET /api/chat-sessions` 응답의 원소
///
/// `#[serde(flatten)]`: 내부 구조체의 필드를 같은 JSON 객체 레벨로 펼칩니다.
/// 결과: `{ "id": ..., "title": ..., "messages": [...] }`
#[derive(Debug, Clone, Serialize)]
pub struct ChatSessionWithMessages {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// 메시지 작성자 역할
///
/// `rename_all = "lowercase"`: JSON에서는 "user", "assistant", "system"으로 표현됩니다.
/// 목록에 없는 값이 오면 역직렬화 단계에서 400 에러가 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// DB `role` 컬럼에 저장되는 문자열
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

/// 세션 생성 요청 — `POST /api/chat-sessions`의 요청 본문
///
/// 두 필드 모두 선택이며, 본문 자체가 없어도 됩니다 (`Default`).
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatSessionRequest {
    pub title: Option<String>,
    pub document_id: Option<String>,
}

impl CreateChatSessionRequest {
    /// 비어 있거나 공백뿐인 제목은 "없음"으로 보고 기본 제목을 씁니다.
    pub fn title_or_default(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(DEFAULT_SESSION_TITLE)
    }

    /// 빈 문자열 document_id는 `None`(SQL NULL)으로 정규화합니다.
    pub fn document_id(&self) -> Option<&str> {
        non_blank(self.document_id.as_deref())
    }
}

/// 메시지 추가 요청 — `POST /api/chat-sessions/{id}/messages`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_title_falls_back_to_default() {
        let req = CreateChatSessionRequest::default();
        assert_eq!(req.title_or_default(), DEFAULT_SESSION_TITLE);
        assert_eq!(req.document_id(), None);

        let req: CreateChatSessionRequest =
            serde_json::from_str(r#"{ "title": "   ", "document_id": "" }"#).unwrap();
        assert_eq!(req.title_or_default(), "New Chat");
        assert_eq!(req.document_id(), None);

        let req: CreateChatSessionRequest =
            serde_json::from_str(r#"{ "title": null, "document_id": null }"#).unwrap();
        assert_eq!(req.title_or_default(), "New Chat");
    }

    #[test]
    fn supplied_fields_are_kept_verbatim() {
        let req: CreateChatSessionRequest =
            serde_json::from_str(r#"{ "title": "Lease Q&A", "document_id": "doc-123" }"#).unwrap();
        assert_eq!(req.title_or_default(), "Lease Q&A");
        assert_eq!(req.document_id(), Some("doc-123"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let ok: CreateMessageRequest =
            serde_json::from_str(r#"{ "role": "assistant", "content": "Cap rate is 6.2%" }"#).unwrap();
        assert_eq!(ok.role, MessageRole::Assistant);
        assert_eq!(ok.role.as_str(), "assistant");

        let bad = serde_json::from_str::<CreateMessageRequest>(r#"{ "role": "robot", "content": "x" }"#);
        assert!(bad.is_err());
    }

    #[test]
    fn nested_session_serializes_flat_with_messages() {
        let nested = ChatSessionWithMessages {
            session: ChatSession {
                id: "s1".into(),
                user_id: "u1".into(),
                title: "New Chat".into(),
                document_id: None,
                created_at: "2026-10-01T00:00:00.000Z".into(),
                updated_at: "2026-10-01T00:00:00.000Z".into(),
            },
            messages: vec![ChatMessage {
                id: "m1".into(),
                session_id: "s1".into(),
                role: "user".into(),
                content: "What is the NOI?".into(),
                created_at: "2026-10-01T00:00:01.000Z".into(),
            }],
        };

        let value = serde_json::to_value(&nested).unwrap();
        assert_eq!(value["id"], "s1");
        assert!(value["document_id"].is_null());
        assert_eq!(value["messages"][0]["content"], "What is the NOI?");
        assert!(value["messages"][0].get("session_id").is_none());
    }
}
