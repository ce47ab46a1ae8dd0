//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 모든 에러 응답은 같은 평면(flat) JSON 형태를 가집니다:
//! ```text
//! { "error": "Database error", "code": "DATABASE_ERROR", "message": "..." }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    ///
    /// 다른 사용자의 세션에 접근한 경우도 여기에 해당합니다.
    /// 403 대신 404를 돌려주어 세션의 존재 여부 자체를 노출하지 않습니다.
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 지원하지 않는 HTTP 메서드 (HTTP 405)
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    /// 리소스 충돌 (HTTP 409) — 예: 이미 가입된 이메일
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    ///
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// (HTTP 상태 코드, 짧은 에러 라벨, 기계가 읽는 에러 코드)
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found", "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request", "BAD_REQUEST"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized", "UNAUTHORIZED"),
            AppError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed",
                "METHOD_NOT_ALLOWED",
            ),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "Conflict", "CONFLICT"),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "INTERNAL_ERROR",
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error",
                "DATABASE_ERROR",
            ),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 데이터베이스 에러는 진단을 위해 드라이버 메시지를 그대로 `message`에 담고,
    /// 서버 로그에도 `error` 레벨로 기록합니다.
    /// `Internal`은 로그에만 상세 내용을 남기고 클라이언트에는 일반 메시지를 보냅니다.
    fn into_response(self) -> Response {
        let (status, error, code) = self.parts();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                e.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::BadRequest(msg) | AppError::Unauthorized(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::NotFound | AppError::MethodNotAllowed(_) => self.to_string(),
        };

        let body = Json(json!({
            "error": error,
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn database_error_keeps_driver_message() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert_eq!(body["error"], "Database error");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn method_not_allowed_names_the_method() {
        let response = AppError::MethodNotAllowed("DELETE".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = body_json(response).await;
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["message"], "Method DELETE not allowed");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = AppError::Internal("secret stack trace".to_string()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
    }
}
