use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Local;
use log::error;
use std::sync::Arc;

use super::{error_response, AppState, LimitParams};
use crate::api::models::{
    ArchiveEntry, MemberDetail, MemberSummary, MembersResponse, TopPerformer, YearArchive,
};
use crate::domain::queries;
use crate::export;
use crate::rating::{
    self, aggregate, aggregate_report, rank, star_representation, top_keywords, KeywordExtractor,
    MemberStats, PerformanceLevel,
};

pub async fn overview_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.load_records() {
        Ok(records) => Json(rating::overview(&records)).into_response(),
        Err(response) => response,
    }
}

pub async fn member_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let stats = aggregate(&records);
    let ranked = rank(&stats, usize::MAX, state.config.analysis.tie_break);

    let members = ranked
        .iter()
        .filter_map(|r| stats.get(&r.member).map(|s| summarize(&r.member, s)))
        .collect();

    Json(MembersResponse {
        members,
        unrated: rating::unrated_members(&stats),
    })
    .into_response()
}

pub async fn top_performers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let limit = params.limit.unwrap_or(state.config.analysis.top_performers);
    let stats = aggregate(&records);

    let performers: Vec<TopPerformer> = rank(&stats, limit, state.config.analysis.tie_break)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| TopPerformer {
            rank: idx + 1,
            stars: star_representation(r.average),
            member: r.member,
            average: r.average,
        })
        .collect();

    Json(performers).into_response()
}

pub async fn keywords(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let extractor = match KeywordExtractor::new(&state.config.analysis.stopwords) {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Keyword extractor setup failed: {:#}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Keyword analysis unavailable");
        }
    };

    let limit = params.limit.unwrap_or(state.config.analysis.keyword_limit);
    Json(top_keywords(&extractor.extract(&records), limit)).into_response()
}

pub async fn recent_reports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let limit = params.limit.unwrap_or(state.config.analysis.recent_reports);
    let summaries: Vec<_> = queries::recent_reports(&records, limit)
        .into_iter()
        .map(|report| aggregate_report(report, state.config.analysis.tie_break))
        .collect();

    Json(summaries).into_response()
}

pub async fn archive(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let years: Vec<YearArchive> = queries::group_by_year(&records)
        .into_iter()
        .map(|group| YearArchive {
            year: group.year,
            reports: group
                .reports
                .into_iter()
                .map(|report| {
                    let stats = aggregate_report(report, state.config.analysis.tie_break);
                    ArchiveEntry {
                        date: stats.date,
                        member_count: stats.member_count,
                        average: stats.average,
                    }
                })
                .collect(),
        })
        .collect();

    Json(years).into_response()
}

pub async fn member_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    let stats = aggregate(&records);
    match stats.get(&name) {
        Some(member_stats) => Json(MemberDetail {
            summary: summarize(&name, member_stats),
            history: queries::member_history(&records, &name),
        })
        .into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("Member '{}' not found", name)),
    }
}

pub async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    let records = match state.load_records() {
        Ok(records) => records,
        Err(response) => return response,
    };

    match export::to_csv(&records) {
        Ok(csv) => {
            let disposition = format!(
                "attachment; filename=\"reports-export-{}.csv\"",
                Local::now().format("%Y-%m-%d")
            );
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            error!("CSV export failed: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export reports")
        }
    }
}

fn summarize(name: &str, stats: &MemberStats) -> MemberSummary {
    let average = stats.average();
    let level = average.map(PerformanceLevel::from_rating);

    MemberSummary {
        name: name.to_string(),
        count: stats.count,
        average,
        min: stats.min,
        max: stats.max,
        last_description: stats.last_description.clone(),
        stars: star_representation(average.unwrap_or(0.0)),
        progress_percent: average.map(rating::progress_percent).unwrap_or(0.0),
        performance_level: level,
        performance_label: level.map(|l| l.label().to_string()),
    }
}
