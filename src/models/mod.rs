//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `chat`: 채팅 세션과 메시지 관련 구조체
//! - `user`: 사용자(User)와 인증 요청/응답 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::ChatSession`처럼 짧게 접근합니다.

pub mod chat;
pub mod user;

pub use chat::*;
pub use user::*;
