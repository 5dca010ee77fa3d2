//! The assembled validation result returned to callers.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::ValidationContext;
use super::issue::{IssueCode, ValidationIssue};

/// Returned data rows, shaped per the `return_objects` option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputData {
    /// Row arrays in input order.
    Rows(Vec<Vec<String>>),
    /// Header-keyed objects in input order.
    Objects(Vec<IndexMap<String, String>>),
}

impl OutputData {
    /// Number of returned rows.
    pub fn len(&self) -> usize {
        match self {
            OutputData::Rows(rows) => rows.len(),
            OutputData::Objects(objects) => objects.len(),
        }
    }

    /// True when no rows are returned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level error payload mirroring the first error in the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub code: IssueCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorPayload {
    /// Build the payload from an accumulated issue.
    pub fn from_issue(issue: &ValidationIssue) -> Self {
        Self {
            code: issue.code,
            message: issue.message.clone(),
            suggested_action: issue.suggestion.clone(),
        }
    }
}

/// Count-level summary, present at `summary` and `detailed` metadata levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub data_quality_score: u8,
}

/// Report metadata, tiered by the `metadata_level` option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    pub summary: ValidationSummary,
    /// Full context, present only at the `detailed` level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ValidationContext>,
    /// SHA-256 fingerprint of the raw input, present at `detailed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// When the analysis ran, present at `detailed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// Final report for one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no error-severity issues were found.
    pub success: bool,
    /// True when the run succeeded and at least one data row was present.
    pub is_valid: bool,
    /// Materialized rows, absent on hard stops and dry runs.
    pub data: Option<OutputData>,
    /// Tiered metadata, absent at level `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ValidationMetadata>,
    /// Mirror of the first error, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
    /// Textual summary of intended changes, present on dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run_summary: Option<String>,
    /// Fresh random identifier for this invocation.
    pub audit_id: Uuid,
}
