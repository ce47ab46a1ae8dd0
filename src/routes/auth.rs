use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{create_access_token, AuthUser},
    models::*,
    routes::parse_body,
    state::AppState,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let req: RegisterRequest = required_body(&body)?;
    let email = normalize_email(&req.email);

    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest("Password must be at least 8 characters".to_string()));
    }

    // Argon2id, 가입마다 새 랜덤 솔트. 이메일 중복은 INSERT의 UNIQUE 위반(409)으로 판정합니다.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user = db_users::create_user(&state.pool, &email, &password_hash).await?;
    tracing::info!(user_id = %user.id, "Registered user");

    let access_token = issue_token(&state, &user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            access_token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AuthResponse>, AppError> {
    let req: LoginRequest = required_body(&body)?;
    let user = db_users::find_by_email(&state.pool, &normalize_email(&req.email))
        .await?
        .ok_or(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let access_token = issue_token(&state, &user.id)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = db_users::find_by_id(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}

fn issue_token(state: &AppState, user_id: &str) -> Result<String, AppError> {
    create_access_token(user_id, &state.jwt_secret, state.access_token_ttl_minutes)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

fn required_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    parse_body(body)?.ok_or_else(|| AppError::BadRequest("Request body is required".to_string()))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
