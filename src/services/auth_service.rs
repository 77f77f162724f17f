use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::JwtKeys;
use crate::models::user::User;
use crate::services::user_store;
use crate::utils::crypto::{check_password_policy, hash_password, verify_password};
use sqlx::SqlitePool;
use tracing::{info, warn};

pub const EMAIL_EXISTS: &str = "Email already exists!";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password!";

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(pool: SqlitePool, keys: JwtKeys) -> Self {
        Self { pool, keys }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        let email = payload.email.trim();
        check_password_policy(&payload.password)?;

        if user_store::find_by_email(&self.pool, email).await?.is_some() {
            warn!(email = %email, "registration with existing email");
            return Err(Error::Conflict(EMAIL_EXISTS.to_string()));
        }

        let hash = hash_password(&payload.password)?;
        let user = user_store::insert(&self.pool, email, &hash, payload.role)
            .await
            .map_err(|e| match e {
                // Lost a race against a concurrent registration.
                Error::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    Error::Conflict(EMAIL_EXISTS.to_string())
                }
                other => other,
            })?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        let email = payload.email.trim();
        let Some(user) = user_store::find_by_email(&self.pool, email).await? else {
            warn!(email = %email, "login with unknown email");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&payload.password, &user.password_hash)? {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.keys.sign(&user)?;
        info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok((user, token))
    }
}
