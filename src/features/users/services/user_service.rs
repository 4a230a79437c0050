use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::TokenService;
use crate::features::users::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterRequestDto, UserResponseDto,
};
use crate::features::users::models::User;
use crate::modules::storage::JsonStore;

/// Service for account registration, login and lookup
pub struct UserService {
    store: Arc<JsonStore>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(store: Arc<JsonStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Register a new user
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let (username, email, password) = dto
            .required_fields()
            .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?;

        // Validate what will be stored, not the raw input
        RegisterRequestDto {
            username: Some(username.clone()),
            email: Some(email.clone()),
            password: Some(password.clone()),
        }
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.email_taken(&email).await {
            return Err(user_exists());
        }

        let password_hash = hash_password(password).await?;
        let user = User::new(username, email, password_hash);

        // Re-checked under the write lock in case a concurrent registration won
        let user = self
            .store
            .write(move |db| {
                if db.users.iter().any(|u| u.email == user.email) {
                    return Err(user_exists());
                }
                db.users.push(user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!("User registered: {} ({})", user.username, user.id);
        self.auth_response(user)
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let (Some(email), Some(password)) = (dto.email, dto.password) else {
            return Err(invalid_credentials());
        };

        let user = self
            .store
            .read(|db| db.users.iter().find(|u| u.email == email.trim()).cloned())
            .await
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(invalid_credentials());
        }

        tracing::info!("User logged in: {}", user.id);
        self.auth_response(user)
    }

    /// Get the public view of a user
    pub async fn get_by_id(&self, id: &str) -> Result<UserResponseDto> {
        self.store
            .read(|db| db.find_user(id).cloned())
            .await
            .map(UserResponseDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn email_taken(&self, email: &str) -> bool {
        self.store
            .read(|db| db.users.iter().any(|u| u.email == email))
            .await
    }

    fn auth_response(&self, user: User) -> Result<AuthResponseDto> {
        let token = self.tokens.create_token(user.id)?;
        Ok(AuthResponseDto {
            user: user.into(),
            token,
        })
    }
}

fn user_exists() -> AppError {
    AppError::BadRequest("User already exists".to_string())
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&password_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}
