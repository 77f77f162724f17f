use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const CANDIDATE_COLUMNS: &str = "id, user_id, name, email, phone, location, experience_years, \
     current_role, current_company, skills, education, expected_salary, notice_period, \
     resume_filename, summary, created_at, updated_at";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience_years: i32,
    pub current_role: String,
    pub current_company: String,
    pub skills: Json<Vec<String>>,
    pub education: String,
    pub expected_salary: String,
    pub notice_period: String,
    pub resume_filename: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate that has been parsed and validated but not yet written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCandidate {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience_years: i32,
    pub current_role: String,
    pub current_company: String,
    pub skills: Vec<String>,
    pub education: String,
    pub expected_salary: String,
    pub notice_period: String,
    pub summary: String,
}
