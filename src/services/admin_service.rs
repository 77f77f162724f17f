use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::services::user_store;
use crate::utils::crypto::{check_password_policy, hash_password};
use sqlx::SqlitePool;
use tracing::{info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@company.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Created,
    Updated,
}

/// Maintenance of recruiter ("admin") accounts for the command-line tools.
#[derive(Clone)]
pub struct AdminService {
    pool: SqlitePool,
}

impl AdminService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_user(&self, email: &str) -> Result<Option<User>> {
        user_store::find_by_email(&self.pool, email.trim()).await
    }

    pub async fn create_admin(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::BadRequest("Email cannot be empty!".into()));
        }
        check_password_policy(password)?;

        let mut tx = self.pool.begin().await?;
        if user_store::find_by_email(&mut *tx, email).await?.is_some() {
            return Err(Error::Conflict(format!(
                "User with email {} already exists!",
                email
            )));
        }
        let hash = hash_password(password)?;
        let user = user_store::insert(&mut *tx, email, &hash, Role::Recruiter).await?;
        tx.commit().await?;

        info!(user_id = %user.id, email = %email, "admin created");
        Ok(user)
    }

    pub async fn update_admin_password(&self, email: &str, password: &str) -> Result<()> {
        check_password_policy(password)?;

        let mut tx = self.pool.begin().await?;
        let user = require_recruiter(user_store::find_by_email(&mut *tx, email.trim()).await?, email)?;
        let hash = hash_password(password)?;
        user_store::update_credentials(&mut *tx, user.id, &hash, Role::Recruiter).await?;
        tx.commit().await?;

        info!(user_id = %user.id, "admin password updated");
        Ok(())
    }

    pub async fn list_admins(&self) -> Result<Vec<User>> {
        user_store::list_by_role(&self.pool, Role::Recruiter).await
    }

    /// Refuses to remove the last remaining recruiter.
    pub async fn delete_admin(&self, email: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let user = require_recruiter(user_store::find_by_email(&mut *tx, email.trim()).await?, email)?;

        let recruiters = user_store::count_by_role(&mut *tx, Role::Recruiter).await?;
        if recruiters <= 1 {
            warn!(user_id = %user.id, "refused to delete last admin");
            return Err(Error::BadRequest(
                "Cannot delete the last admin user!".into(),
            ));
        }

        user_store::delete(&mut *tx, user.id).await?;
        tx.commit().await?;

        info!(user_id = %user.id, "admin deleted");
        Ok(())
    }

    /// Replaces `admin@company.com` with a fresh account using the default
    /// password.
    pub async fn reset_default_admin(&self) -> Result<User> {
        let hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;

        let mut tx = self.pool.begin().await?;
        if let Some(existing) = user_store::find_by_email(&mut *tx, DEFAULT_ADMIN_EMAIL).await? {
            user_store::delete(&mut *tx, existing.id).await?;
        }
        let user = user_store::insert(&mut *tx, DEFAULT_ADMIN_EMAIL, &hash, Role::Recruiter).await?;
        tx.commit().await?;

        info!(user_id = %user.id, "default admin reset");
        Ok(user)
    }

    /// Creates a recruiter with these credentials, or overwrites the password
    /// of an existing account and promotes it to recruiter.
    pub async fn quick_reset(&self, email: &str, password: &str) -> Result<ResetOutcome> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::BadRequest("Email cannot be empty!".into()));
        }
        let hash = hash_password(password)?;

        let mut tx = self.pool.begin().await?;
        let outcome = match user_store::find_by_email(&mut *tx, email).await? {
            Some(existing) => {
                user_store::update_credentials(&mut *tx, existing.id, &hash, Role::Recruiter).await?;
                ResetOutcome::Updated
            }
            None => {
                user_store::insert(&mut *tx, email, &hash, Role::Recruiter).await?;
                ResetOutcome::Created
            }
        };
        tx.commit().await?;

        info!(email = %email, outcome = ?outcome, "admin credentials configured");
        Ok(outcome)
    }

    /// Startup seeding. Returns true when the default admin had to be created.
    pub async fn ensure_default_admin(&self) -> Result<bool> {
        if user_store::find_by_email(&self.pool, DEFAULT_ADMIN_EMAIL)
            .await?
            .is_some()
        {
            return Ok(false);
        }
        let hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
        user_store::insert(&self.pool, DEFAULT_ADMIN_EMAIL, &hash, Role::Recruiter).await?;
        warn!(email = DEFAULT_ADMIN_EMAIL, "default admin created; change its password");
        Ok(true)
    }
}

fn require_recruiter(user: Option<User>, email: &str) -> Result<User> {
    let user = user.ok_or_else(|| Error::NotFound(format!("User with email {} not found!", email)))?;
    if !user.is_recruiter() {
        return Err(Error::BadRequest(format!("User {} is not a recruiter!", email)));
    }
    Ok(user)
}
