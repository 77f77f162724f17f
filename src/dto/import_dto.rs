use serde::{Deserialize, Serialize};

use crate::services::import_service::ImportSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success_count: usize,
    pub error_count: usize,
    pub message: String,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: format!(
                "Upload completed! {} candidates added, {} errors.",
                summary.success_count, summary.error_count
            ),
            success_count: summary.success_count,
            error_count: summary.error_count,
        }
    }
}
