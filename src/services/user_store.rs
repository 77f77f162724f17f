//! Queries over the `users` table, usable with a pool or inside a transaction.

use crate::error::Result;
use crate::models::user::{Role, User};
use chrono::Utc;
use sqlx::SqliteExecutor;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at";

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(executor)
    .await?;
    Ok(user)
}

pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(user)
}

pub async fn insert<'e, E>(executor: E, email: &str, password_hash: &str, role: Role) -> Result<User>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, email, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;
    Ok(user)
}

pub async fn update_credentials<'e, E>(
    executor: E,
    id: Uuid,
    password_hash: &str,
    role: Role,
) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE users SET password_hash = ?, role = ? WHERE id = ?")
        .bind(password_hash)
        .bind(role.as_str())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_by_role<'e, E>(executor: E, role: Role) -> Result<Vec<User>>
where
    E: SqliteExecutor<'e>,
{
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE role = ? ORDER BY created_at ASC",
        USER_COLUMNS
    ))
    .bind(role.as_str())
    .fetch_all(executor)
    .await?;
    Ok(users)
}

pub async fn count_by_role<'e, E>(executor: E, role: Role) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(role.as_str())
        .fetch_one(executor)
        .await?;
    Ok(count)
}
