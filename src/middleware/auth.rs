use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::user::{Role, User},
    services::user_store,
    AppState,
};

pub const ACCESS_DENIED: &str = "Access denied!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes.max(1)),
        }
    }

    pub fn sign(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %user.id, role = %user.role, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_keys.clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// The identity behind a valid bearer token. The account is reloaded on
/// every request, so deletions and role changes apply to tokens already
/// issued.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Explicit role gate: anything but `role` is a typed forbidden outcome.
    pub fn require(&self, role: Role) -> Result<()> {
        if self.role != role {
            warn!(user_id = %self.id, role = %self.role, required = %role, "access denied");
            return Err(Error::Forbidden(ACCESS_DENIED.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
    SqlitePool: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| Error::Unauthorized("missing_authorization".into()))?;
        let header = header
            .to_str()
            .map_err(|_| Error::Unauthorized("bad_authorization".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("unsupported_scheme".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            Error::Unauthorized("invalid_token".into())
        })?;

        let pool = SqlitePool::from_ref(state);
        let user = user_store::find_by_id(&pool, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token for unknown user");
                Error::Unauthorized("unknown_user".into())
            })?;
        if user.role != claims.role {
            debug!(user_id = %user.id, token_role = %claims.role, role = %user.role, "role changed since token was issued");
        }

        Ok(AuthUser {
            id: user.id,
            role: user.role,
        })
    }
}

/// Extractor for recruiter-only routes.
#[derive(Debug, Clone, Copy)]
pub struct RecruiterUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RecruiterUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
    SqlitePool: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Role::Recruiter)?;
        Ok(RecruiterUser(user))
    }
}

/// Extractor for routes where a candidate manages their own data.
#[derive(Debug, Clone, Copy)]
pub struct CandidateUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for CandidateUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
    SqlitePool: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Role::Candidate)?;
        Ok(CandidateUser(user))
    }
}
