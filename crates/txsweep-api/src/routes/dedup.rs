//! Deduplication API endpoints - JSON API
//!
//! Endpoints:
//! - api_duplicates_preview: report duplicate groups without deleting
//! - api_deduplicate: remove duplicates in one atomic batch
//! - api_reload: re-read the backing document file

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use txsweep_core::{
    find_duplicate_groups, run_deduplication, DuplicateGroup, FieldMatcher, TransactionStore,
};

use crate::error::ApiError;
use crate::AppState;

/// Response body for the deduplicate endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupResponse {
    pub success: bool,
    pub message: String,
    pub removed_count: usize,
    /// Omitted entirely on the no-duplicates short circuit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_groups: Option<Vec<DuplicateGroup>>,
}

/// Response body for the preview endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub success: bool,
    pub message: String,
    pub group_count: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
}

/// Report the duplicate groups a removal would act on, without touching
/// storage (JSON API)
pub async fn api_duplicates_preview(
    State(state): State<AppState>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let mut transactions = state.store.fetch_all().await.map_err(|e| {
        log::error!("duplicate preview failed: {} ({})", e, e.code());
        ApiError::DedupFailed
    })?;
    transactions.sort_by_key(|tx| tx.timestamp_millis().unwrap_or(i64::MAX));

    let matcher = FieldMatcher::from_config(&state.config.dedup);
    let groups = find_duplicate_groups(
        &transactions,
        state.config.dedup.window_millis,
        state.config.dedup.chaining,
        &matcher,
    );

    let message = if groups.is_empty() {
        "No duplicate transactions found".to_string()
    } else {
        format!("Found {} duplicate groups", groups.len())
    };

    Ok(Json(PreviewResponse {
        success: true,
        message,
        group_count: groups.len(),
        duplicate_groups: groups,
    }))
}

/// Remove all non-survivor duplicates in a single atomic batch (JSON API)
pub async fn api_deduplicate(
    State(state): State<AppState>,
) -> Result<Json<DedupResponse>, ApiError> {
    let matcher = FieldMatcher::from_config(&state.config.dedup);
    let outcome = run_deduplication(state.store.as_ref(), &matcher, &state.config.dedup)
        .await
        .map_err(|e| {
            log::error!("deduplication failed: {} ({})", e, e.code());
            ApiError::DedupFailed
        })?;

    if outcome.groups.is_empty() {
        return Ok(Json(DedupResponse {
            success: true,
            message: "No duplicate transactions found".to_string(),
            removed_count: 0,
            duplicate_groups: None,
        }));
    }

    Ok(Json(DedupResponse {
        success: true,
        message: format!(
            "Removed {} duplicate transactions across {} groups",
            outcome.removed_count,
            outcome.groups.len()
        ),
        removed_count: outcome.removed_count,
        duplicate_groups: Some(outcome.groups),
    }))
}

/// Re-read the document file from disk (JSON API)
pub async fn api_reload(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.store.reload().await {
        Ok(count) => Ok(Json(serde_json::json!({
            "success": true,
            "message": format!("Reloaded {} transactions", count),
        }))),
        Err(e) => {
            log::error!("reload failed: {} ({})", e, e.code());
            Err(ApiError::ReloadFailed)
        }
    }
}
