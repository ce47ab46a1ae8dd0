//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 회원가입, 로그인, 내 정보
//! - `chat_sessions`: 채팅 세션 목록/생성, 메시지 추가
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod auth;
pub mod chat_sessions;
pub mod health;

pub use chat_sessions::*;
pub use health::*;

use crate::{error::AppError, state::AppState};
use axum::{
    body::Bytes,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// `/api` 아래에 들어갈 라우트 목록
///
/// 경로 파라미터는 Axum 0.8 문법인 `{id}`를 사용합니다.
/// `.fallback(method_not_allowed)`: 같은 경로에 등록되지 않은 메서드가 오면
/// Axum 기본 405(빈 본문) 대신 JSON 에러 본문을 돌려줍니다.
fn api_routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route(
            "/auth/register",
            post(auth::register).fallback(method_not_allowed),
        )
        .route("/auth/login", post(auth::login).fallback(method_not_allowed))
        .route("/auth/me", get(auth::me).fallback(method_not_allowed));

    Router::new()
        .merge(auth_routes)
        .route(
            "/chat-sessions",
            get(list_chat_sessions)
                .post(create_chat_session)
                .fallback(method_not_allowed),
        )
        .route(
            "/chat-sessions/{id}",
            get(get_chat_session).fallback(method_not_allowed),
        )
        .route(
            "/chat-sessions/{id}/messages",
            post(create_chat_message).fallback(method_not_allowed),
        )
        .route("/health", get(health_check).fallback(method_not_allowed))
}

/// 상태와 미들웨어까지 조립된 전체 애플리케이션 라우터
///
/// `main`과 테스트가 같은 함수를 사용하므로, 테스트는 실제 서버와
/// 동일한 라우팅/미들웨어 구성을 거칩니다.
pub fn app(state: AppState) -> Router {
    // 브라우저 프론트엔드가 다른 출처에서 호출하므로 모든 출처/메서드/헤더를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes().with_state(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 요청 본문을 JSON으로 파싱합니다.
///
/// 핸들러는 `Json<T>` 대신 `Bytes`를 받고 이 함수로 파싱합니다. `Json<T>`의 거부 응답은
/// 일반 텍스트라서, 모든 에러를 같은 JSON 형태로 돌려주려면 여기서 `AppError`로 바꿔야 합니다.
///
/// - 본문이 비어 있으면(공백만 있어도) `Ok(None)`
/// - JSON 형식이 잘못되었으면 400 `BadRequest`
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}
