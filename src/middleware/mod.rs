//! # 미들웨어 모듈
//!
//! - `auth`: Bearer 토큰을 검증하여 `AuthUser`를 만드는 Extractor
//!
//! 인증은 핸들러 매개변수(`auth_user: AuthUser`)로 표현됩니다.
//! 토큰 검증에 실패하면 핸들러 본문은 실행되지 않고 곧바로 401이 반환됩니다.

pub mod auth;
