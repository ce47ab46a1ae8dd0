//! # 애플리케이션 공유 상태
//!
//! 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
//! Axum의 의존성 주입(Dependency Injection) 메커니즘입니다.
//!
//! 핸들러는 환경변수나 전역 값을 직접 읽지 않습니다. 테스트에서는
//! 인메모리 SQLite 풀이나 닫힌 풀을 넣어 같은 핸들러를 그대로 실행합니다.

use sqlx::SqlitePool;

/// `#[derive(Clone)]`: Axum의 State Extractor는 요청마다 AppState를 clone합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 실제 풀이 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 서명/검증용 비밀키
    pub jwt_secret: String,
    /// 새로 발급하는 액세스 토큰의 유효 시간(분)
    pub access_token_ttl_minutes: i64,
}
