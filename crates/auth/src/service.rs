use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use storage::{NewUser, StoreError, User, UserRepository};

use crate::error::{AuthError, Result};
use crate::jwt::{Claims, TokenService};
use crate::password::{generate_salt, hash_password, verify_password};

/// Authentication service: registration, login, token validation, profile.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

/// Non-sensitive view of a user. The password digest and salt are never
/// part of this structure.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user.
    ///
    /// The store enforces email uniqueness atomically with the insert; a
    /// duplicate surfaces as [`AuthError::EmailTaken`], a user-facing
    /// conflict rather than a hard failure.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        let salt = generate_salt();
        let password_hash = hash_password(password, &salt)?;

        let new_user = NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
            salt,
        };

        match self.users.insert_user(new_user).await {
            Ok(user) => Ok(user),
            Err(StoreError::EmailTaken) => Err(AuthError::EmailTaken),
            Err(e) => Err(AuthError::Storage(e)),
        }
    }

    /// Login with email and password, returning a signed bearer token.
    ///
    /// An unknown email and a wrong password both return
    /// [`AuthError::InvalidCredentials`]; the caller cannot tell which.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash, &user.salt) {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(&user)
    }

    /// Validate a bearer token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        self.tokens.validate(token)
    }

    /// Profile view for an authenticated user.
    pub async fn profile(&self, user_id: i64) -> Result<Profile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Profile {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        })
    }
}
