use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of row errors echoed back from an import.
pub const MAX_REPORTED_IMPORT_ERRORS: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReportDto {
    pub created: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}
