use crate::error::{Error, Result};
use crate::models::candidate::NewCandidate;
use crate::services::candidate_service::insert_candidate;
use crate::services::spreadsheet::{self, RowError, RowResult, SheetRow, UploadKind};
use crate::utils::skills::parse_skills;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const INVALID_FILE_TYPE: &str = "Please upload a valid Excel (.xlsx) or CSV file!";
pub const NO_FILE_SELECTED: &str = "No file selected!";

/// Columns of the bulk-upload spreadsheet, in template order.
pub const TEMPLATE_COLUMNS: [&str; 12] = [
    "name",
    "email",
    "phone",
    "location",
    "experience_years",
    "current_role",
    "current_company",
    "skills",
    "education",
    "expected_salary",
    "notice_period",
    "summary",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub success_count: usize,
    pub error_count: usize,
}

impl NewCandidate {
    pub fn from_sheet_row(row: &SheetRow) -> std::result::Result<Self, RowError> {
        Ok(Self {
            user_id: None,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.text("phone")?,
            location: row.text("location")?,
            experience_years: row.non_negative_int("experience_years")?,
            current_role: row.text("current_role")?,
            current_company: row.text("current_company")?,
            skills: parse_skills(&row.text("skills")?),
            education: row.text("education")?,
            expected_salary: row.text("expected_salary")?,
            notice_period: row.text("notice_period")?,
            summary: row.text("summary")?,
        })
    }
}

#[derive(Clone)]
pub struct ImportService {
    pool: SqlitePool,
}

impl ImportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Imports an uploaded spreadsheet. The file name decides the format; the
    /// store is not touched unless it is `.csv` or `.xlsx`.
    pub async fn import_file(&self, filename: &str, data: &[u8]) -> Result<ImportSummary> {
        let kind = UploadKind::from_filename(filename).ok_or_else(|| {
            warn!(filename = %filename, "rejected upload with unsupported type");
            Error::BadRequest(INVALID_FILE_TYPE.to_string())
        })?;

        let rows = spreadsheet::parse(kind, data).map_err(|e| {
            warn!(filename = %filename, error = %e, "could not read upload");
            Error::BadRequest(format!("Error processing file: {}", e))
        })?;

        let summary = self.import_rows(rows).await?;
        info!(
            filename = %filename,
            added = summary.success_count,
            errors = summary.error_count,
            "bulk upload finished"
        );
        Ok(summary)
    }

    /// Stages every acceptable row and commits them in one transaction.
    ///
    /// A row is rejected when it cannot be coerced or when its email already
    /// belonged to a candidate before this import began. Rows of the same batch
    /// are not checked against each other.
    pub async fn import_rows(&self, rows: Vec<RowResult>) -> Result<ImportSummary> {
        self.run_batch(rows)
            .await
            .map_err(|e| Error::Internal(format!("Error processing file: {}", e)))
    }

    async fn run_batch(&self, rows: Vec<RowResult>) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut staged = Vec::new();
        let mut tx = self.pool.begin().await?;

        for (index, row) in rows.into_iter().enumerate() {
            let line = index + 2;
            let candidate = match row.and_then(|r| NewCandidate::from_sheet_row(&r)) {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!(line, error = %e, "skipping row");
                    summary.error_count += 1;
                    continue;
                }
            };

            // Staged rows are only written after the loop, so this sees
            // pre-existing candidates only.
            let existing: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM candidates WHERE email = ? LIMIT 1")
                    .bind(&candidate.email)
                    .fetch_optional(&mut *tx)
                    .await?;
            if existing.is_some() {
                debug!(line, email = %candidate.email, "skipping existing email");
                summary.error_count += 1;
                continue;
            }

            staged.push(candidate);
        }

        for candidate in &staged {
            insert_candidate(&mut *tx, candidate).await?;
        }
        tx.commit().await?;

        summary.success_count = staged.len();
        Ok(summary)
    }
}
