use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: Uuid,
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
    pub resume_filename: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateResponse {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            location: c.location,
            experience_years: c.experience_years,
            current_role: c.current_role,
            current_company: c.current_company,
            skills: c.skills.0,
            education: c.education,
            expected_salary: c.expected_salary,
            notice_period: c.notice_period,
            resume_filename: c.resume_filename,
            summary: c.summary,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Raw search parameters as they arrive on the query string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<CandidateResponse>,
    pub total: usize,
    pub filters: SearchQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_candidates: i64,
    pub recent_candidates: Vec<CandidateResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfilePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 0))]
    pub experience_years: i32,
    #[serde(default)]
    pub current_role: String,
    #[serde(default)]
    pub current_company: String,
    /// Comma-separated, e.g. `"Python, Flask, SQL"`.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub expected_salary: String,
    #[serde(default)]
    pub notice_period: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Option<CandidateResponse>,
    pub skills_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSavedResponse {
    pub message: String,
    pub created: bool,
    pub profile: CandidateResponse,
}
