//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 `AppState`로 주입받은 풀을 이 모듈의 함수에 넘깁니다.
//!
//! 각 하위 모듈:
//! - `chat_sessions`: 채팅 세션과 메시지 쿼리
//! - `users`: 사용자 계정 쿼리

pub mod chat_sessions;
pub mod users;

pub use chat_sessions::*;

use chrono::Utc;
use sqlx::SqlitePool;

/// DB에 저장하는 타임스탬프 형식 (밀리초 정밀도, UTC)
///
/// SQL의 `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`와 같은 형식이라
/// DB DEFAULT로 채워진 값과 문자열 비교로 정렬해도 순서가 맞습니다.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 풀에서 연결을 하나 빌려 `SELECT 1`을 실행합니다. 헬스체크용입니다.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// 테스트용 인메모리 SQLite 풀
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 제한합니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// 테스트용 파일 기반 SQLite 풀
///
/// 인메모리 풀은 연결이 하나뿐이라 잠금 경합이 생기지 않습니다.
/// 여러 연결이 같은 파일을 동시에 쓰는 상황은 이 풀로 확인합니다.
/// 반환된 `TempDir`이 drop되면 DB 파일도 함께 지워지므로 테스트가 끝날 때까지 들고 있어야 합니다.
#[cfg(test)]
pub async fn file_test_pool(max_connections: u32) -> (tempfile::TempDir, SqlitePool) {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    (dir, pool)
}
