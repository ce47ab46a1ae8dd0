//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok", "database": "ok" }`
//!
//! DB에 `SELECT 1`을 한 번 보내 연결 풀이 살아 있는지까지 확인합니다.
//! 로드밸런서나 컨테이너 오케스트레이터의 헬스체크에 사용됩니다.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /api/health` — 서버와 DB 상태를 확인합니다.
///
/// 인증이 필요 없습니다. DB 확인에 실패하면 500이 아닌 503을 반환합니다.
/// 서버 자체는 응답하고 있지만 요청을 처리할 수 없는 상태라는 뜻입니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match db::ping(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn state(pool: sqlx::SqlitePool) -> State<AppState> {
        State(AppState {
            pool,
            jwt_secret: "test-secret".to_string(),
            access_token_ttl_minutes: 60,
        })
    }

    #[tokio::test]
    async fn healthy_database_reports_ok() {
        let (status, Json(body)) = health_check(state(test_pool().await)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "ok");
    }

    #[tokio::test]
    async fn closed_pool_reports_unavailable() {
        let pool = test_pool().await;
        pool.close().await;

        let (status, Json(body)) = health_check(state(pool)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
    }
}
