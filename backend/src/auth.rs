use axum::http::{header, HeaderMap};
use shared::{AuthUser, Credentials, SessionInfo};
use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::error::ApiError;

/// Identity provider: registers users, issues bearer tokens and resolves
/// them back to a user. Tokens are opaque uuids backed by the sessions
/// table; one row per login, removed on logout.
#[derive(Clone)]
pub struct AuthService {
    db: DbConnection,
}

impl AuthService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn register(&self, credentials: Credentials) -> Result<SessionInfo, ApiError> {
        if credentials.email.trim().is_empty() || !credentials.email.contains('@') {
            return Err(ApiError::Validation("A valid email is required".to_string()));
        }
        if credentials.password.len() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if self.db.find_user_by_email(&credentials.email).await?.is_some() {
            return Err(ApiError::Validation(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&credentials.password, bcrypt::DEFAULT_COST)
            .map_err(anyhow::Error::from)?;
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: credentials.email,
        };
        self.db.insert_user(&user, &password_hash).await?;
        info!("registered user {}", user.id);

        self.issue_session(user).await
    }

    pub async fn login(&self, credentials: Credentials) -> Result<SessionInfo, ApiError> {
        let (user, password_hash) = self
            .db
            .find_user_by_email(&credentials.email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        let valid =
            bcrypt::verify(&credentials.password, &password_hash).map_err(anyhow::Error::from)?;
        if !valid {
            return Err(ApiError::Unauthorized);
        }

        info!("user {} logged in", user.id);
        self.issue_session(user).await
    }

    /// Logout always succeeds; an unknown or absent token is a no-op.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        if let Some(token) = token {
            self.db.delete_session(token).await?;
        }
        Ok(())
    }

    /// Resolve the Authorization header to an identity, or 401.
    pub async fn require_user(&self, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
        let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
        self.db
            .find_session_user(token)
            .await?
            .ok_or(ApiError::Unauthorized)
    }

    async fn issue_session(&self, user: AuthUser) -> Result<SessionInfo, ApiError> {
        let token = Uuid::new_v4().to_string();
        self.db.insert_session(&token, &user.id).await?;
        Ok(SessionInfo { token, user })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
