use crate::error::AppError;
use crate::models::User;
use sqlx::SqlitePool;

pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        // UNIQUE(email) 위반: 동시에 같은 이메일로 가입해도 패자는 409를 받습니다.
        if e
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation())
        {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    find_by_id(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{file_test_pool, test_pool};

    #[tokio::test]
    async fn create_then_find_by_email() {
        let pool = test_pool().await;
        let user = create_user(&pool, "broker@example.com", "hash").await.unwrap();

        let found = find_by_email(&pool, "broker@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(find_by_email(&pool, "nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = test_pool().await;
        create_user(&pool, "dup@example.com", "hash").await.unwrap();

        let err = create_user(&pool, "dup@example.com", "hash").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_registrations_yield_one_user_and_conflicts() {
        let (_dir, pool) = file_test_pool(5).await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { create_user(&pool, "race@example.com", "hash").await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(created, 1);
    }
}
