//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 액세스 토큰 서명에 사용할 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `ACCESS_TOKEN_TTL_MINUTES`: 액세스 토큰 유효 시간(분)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번만 읽습니다. 핸들러는 이 값을 직접 읽지 않고,
/// `main`에서 만든 `AppState`를 통해 필요한 값만 주입받습니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/om-intel-chat.db?mode=rwc")
    pub database_url: String,
    /// JWT 서명/검증용 비밀키
    pub jwt_secret: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 액세스 토큰 유효 시간(분) (기본값: 60)
    pub access_token_ttl_minutes: i64,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 `VarError`를 반환합니다.
    /// 나머지 값은 없거나 숫자로 파싱되지 않으면 기본값을 사용합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            access_token_ttl_minutes: parse_or("ACCESS_TOKEN_TTL_MINUTES", 60),
        })
    }
}

/// 환경변수를 숫자로 파싱하고, 없거나 잘못된 값이면 `default`를 돌려줍니다.
///
/// 제네릭 `T: FromStr`: u16, i64 등 `.parse()`가 가능한 모든 타입에 쓸 수 있습니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_and_garbage() {
        // 테스트 전용 키를 사용해 다른 테스트의 환경변수와 겹치지 않게 합니다.
        env::remove_var("OM_TEST_PORT_MISSING");
        assert_eq!(parse_or::<u16>("OM_TEST_PORT_MISSING", 3000), 3000);

        env::set_var("OM_TEST_PORT_GARBAGE", "not-a-port");
        assert_eq!(parse_or::<u16>("OM_TEST_PORT_GARBAGE", 3000), 3000);

        env::set_var("OM_TEST_PORT_VALID", " 8080 ");
        assert_eq!(parse_or::<u16>("OM_TEST_PORT_VALID", 3000), 8080);
    }
}
