//! Response wrappers, error mapping and query-string helpers shared by all
//! HTTP modules

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use std::str::FromStr;

use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{DomainError, Page};

/// Standard API response wrapper
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain error onto an HTTP status and error body.
pub fn error_response(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) if e.is_transient() => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
    };

    if status.is_server_error() {
        error!("Request failed: {}", e);
    } else {
        warn!("Request rejected: {}", e);
    }

    (status, Json(ApiResponse::error(e.to_string())))
}

/// One page of results plus navigation metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub current_page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub start_page: u32,
    pub end_page: u32,
    /// Page links of the five-wide navigation window
    pub page_numbers: Vec<u32>,
}

impl<T> PageResponse<T> {
    pub fn from_page<V>(page: Page<V>) -> Self
    where
        T: From<V>,
    {
        let (current_page, size, total_elements, total_pages) = (
            page.current_page(),
            page.size(),
            page.total_elements(),
            page.total_pages(),
        );
        let (has_next, has_previous, is_first, is_last) =
            (page.has_next(), page.has_previous(), page.is_first(), page.is_last());
        let (start_page, end_page, page_numbers) =
            (page.start_page(), page.end_page(), page.page_numbers());

        Self {
            content: page.into_content().into_iter().map(T::from).collect(),
            current_page,
            size,
            total_elements,
            total_pages,
            has_next,
            has_previous,
            is_first,
            is_last,
            start_page,
            end_page,
            page_numbers,
        }
    }
}

// ── Lenient query-string decoding ───────────────────────────────
//
// Optional filters that fail to parse are dropped instead of rejecting the
// request.

pub fn parse_opt<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

pub fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") | Some("y") | Some("yes") => Some(true),
        Some("false") | Some("0") | Some("n") | Some("no") => Some(false),
        _ => None,
    }
}

/// `YYYY-MM-DD`
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Comma separated ids; unparseable entries are skipped.
pub fn parse_id_list(raw: Option<&str>) -> Vec<i64> {
    raw.map(|s| s.split(',').filter_map(|id| id.trim().parse().ok()).collect())
        .unwrap_or_default()
}

/// Page number or size; anything unparseable becomes `fallback` and is
/// corrected later by the condition normalizer.
pub fn parse_paging(raw: Option<&str>, fallback: i64) -> i64 {
    parse_opt(raw).unwrap_or(fallback)
}

// ── Tests ──────────────────────────────────────────────────────
