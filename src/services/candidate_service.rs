use crate::dto::candidate_dto::ProfilePayload;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, NewCandidate, CANDIDATE_COLUMNS};
use crate::services::search::SearchFilter;
use crate::services::user_store;
use crate::utils::skills::parse_skills;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
}

impl CandidateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE id = ?",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE user_id = ?",
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates ORDER BY created_at DESC LIMIT ?",
            CANDIDATE_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    /// Full matching set, most recently updated first.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Candidate>> {
        let (where_clause, args) = filter.where_clause();
        let sql = format!(
            "SELECT {} FROM candidates {} ORDER BY updated_at DESC",
            CANDIDATE_COLUMNS, where_clause
        );

        let mut statement = sqlx::query_as::<_, Candidate>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let candidates = statement.fetch_all(&self.pool).await?;

        debug!(
            filter = ?filter,
            unfiltered = filter.is_empty(),
            matches = candidates.len(),
            "candidate search"
        );
        Ok(candidates)
    }

    /// Updates the caller's profile in place, or creates it on first save.
    /// Returns the stored profile and whether it was created.
    pub async fn upsert_profile(
        &self,
        user_id: Uuid,
        payload: ProfilePayload,
    ) -> Result<(Candidate, bool)> {
        let mut tx = self.pool.begin().await?;

        let user = user_store::find_by_id(&mut *tx, user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized("Unknown user".to_string()))?;

        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM candidates WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let skills = parse_skills(&payload.skills);
        let (candidate, created) = match existing {
            Some(id) => {
                let candidate = sqlx::query_as::<_, Candidate>(&format!(
                    "UPDATE candidates SET
                        name = ?, phone = ?, location = ?, experience_years = ?,
                        current_role = ?, current_company = ?, skills = ?, education = ?,
                        expected_salary = ?, notice_period = ?, summary = ?, updated_at = ?
                     WHERE id = ?
                     RETURNING {}",
                    CANDIDATE_COLUMNS
                ))
                .bind(&payload.name)
                .bind(&payload.phone)
                .bind(&payload.location)
                .bind(payload.experience_years)
                .bind(&payload.current_role)
                .bind(&payload.current_company)
                .bind(Json(&skills))
                .bind(&payload.education)
                .bind(&payload.expected_salary)
                .bind(&payload.notice_period)
                .bind(&payload.summary)
                .bind(Utc::now())
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                (candidate, false)
            }
            None => {
                let new = NewCandidate {
                    user_id: Some(user.id),
                    name: payload.name,
                    email: user.email.clone(),
                    phone: payload.phone,
                    location: payload.location,
                    experience_years: payload.experience_years,
                    current_role: payload.current_role,
                    current_company: payload.current_company,
                    skills,
                    education: payload.education,
                    expected_salary: payload.expected_salary,
                    notice_period: payload.notice_period,
                    summary: payload.summary,
                };
                (insert_candidate(&mut *tx, &new).await?, true)
            }
        };

        tx.commit().await?;
        info!(user_id = %user_id, candidate_id = %candidate.id, created, "profile saved");
        Ok((candidate, created))
    }
}

pub async fn insert_candidate<'e, E>(executor: E, new: &NewCandidate) -> Result<Candidate>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();
    let candidate = sqlx::query_as::<_, Candidate>(&format!(
        "INSERT INTO candidates (
            id, user_id, name, email, phone, location, experience_years,
            current_role, current_company, skills, education, expected_salary,
            notice_period, summary, created_at, updated_at
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING {}",
        CANDIDATE_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.location)
    .bind(new.experience_years)
    .bind(&new.current_role)
    .bind(&new.current_company)
    .bind(Json(&new.skills))
    .bind(&new.education)
    .bind(&new.expected_salary)
    .bind(&new.notice_period)
    .bind(&new.summary)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(candidate)
}
