use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use std::sync::Arc;

use super::{error_response, parse_date_param, parse_report_body, store_error_response, AppState, SearchParams};
use crate::api::models::{DeleteResponse, SaveResponse};
use crate::domain::{queries, ReportRecord};
use crate::rating::aggregate_report;
use crate::store::UpsertOutcome;

pub async fn list_reports(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.load_records() {
        Ok(records) => Json(records).into_response(),
        Err(response) => response,
    }
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReportRecord>, JsonRejection>,
) -> impl IntoResponse {
    let report = match parse_report_body(body) {
        Ok(report) => report,
        Err(response) => return response,
    };

    let _guard = state.lock_writes().await;

    match state.store.upsert(report.clone()) {
        Ok(outcome) => {
            let verb = match outcome {
                UpsertOutcome::Created => "Created",
                UpsertOutcome::Replaced => "Replaced",
            };
            info!("{} report for {}", verb, report.date);
            Json(SaveResponse { success: true, report }).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match state.store.find(date) {
        Ok(Some(report)) => Json(report).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Report not found"),
        Err(e) => store_error_response(e),
    }
}

pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    body: Result<Json<ReportRecord>, JsonRejection>,
) -> impl IntoResponse {
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let report = match parse_report_body(body) {
        Ok(report) => report,
        Err(response) => return response,
    };

    let _guard = state.lock_writes().await;

    match state.store.update(date, report) {
        Ok(report) => {
            info!("Updated report for {}", date);
            Json(SaveResponse { success: true, report }).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    let _guard = state.lock_writes().await;

    match state.store.delete(date) {
        Ok(removed) => {
            if removed {
                info!("Deleted report for {}", date);
            }
            Json(DeleteResponse { success: true }).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn report_summary(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match state.store.find(date) {
        Ok(Some(report)) => Json(aggregate_report(&report, state.config.analysis.tie_break)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Report not found"),
        Err(e) => store_error_response(e),
    }
}

pub async fn search_reports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let matches: Vec<&ReportRecord> = match params.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => match parse_date_param(raw) {
            Ok(date) => queries::filter_by_date(&records, date),
            Err(response) => return response,
        },
        None => queries::search(&records, params.q.as_deref().unwrap_or("")),
    };

    Json(matches).into_response()
}
