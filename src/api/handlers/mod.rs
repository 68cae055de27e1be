use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDate;
use log::{error, warn};
use serde::Deserialize;
use tokio::sync::{Mutex, MutexGuard};

use crate::api::models::ErrorResponse;
use crate::config::settings::AppConfig;
use crate::domain::{parse_report_date, ReportRecord};
use crate::errors::StoreError;
use crate::store::ReportStore;

pub mod reports;
pub mod stats;

pub struct AppState {
    pub store: ReportStore,
    pub config: AppConfig,
    write_lock: Mutex<()>,
}

impl AppState {
    pub fn new(store: ReportStore, config: AppConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Serializes read-modify-write cycles on the reports file
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub(crate) fn load_records(&self) -> Result<Vec<ReportRecord>, Response> {
        self.store.load_all().map_err(store_error_response)
    }
}

#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub date: Option<String>,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

pub(crate) fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Report not found"),
        StoreError::DateConflict(_) => error_response(StatusCode::CONFLICT, err.to_string()),
        _ if err.is_unavailable() => {
            error!("Error reading reports: {:#}", anyhow::Error::from(err));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read reports")
        }
        _ => {
            error!("Error saving reports: {:#}", anyhow::Error::from(err));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save reports")
        }
    }
}

pub(crate) fn parse_date_param(raw: &str) -> Result<NaiveDate, Response> {
    parse_report_date(raw).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", raw),
        )
    })
}

/// Malformed or incomplete report bodies become a JSON 400
pub(crate) fn parse_report_body(body: Result<Json<ReportRecord>, JsonRejection>) -> Result<ReportRecord, Response> {
    body.map(|Json(report)| report).map_err(|rejection| {
        warn!("Rejected report body: {}", rejection.body_text());
        error_response(StatusCode::BAD_REQUEST, rejection.body_text())
    })
}
