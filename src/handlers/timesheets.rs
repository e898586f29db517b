use actix_web::{web, HttpResponse, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::ComputeTimesheetInput;
use crate::handlers::outcome_response;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub approver_id: String,
}

/// Compute a timesheet from one check-in/check-out pair.
pub async fn compute_timesheet(
    state: web::Data<AppState>,
    input: web::Json<ComputeTimesheetInput>,
) -> Result<HttpResponse> {
    let timesheet = state.timesheet_service.compute(input.into_inner())?;
    Ok(HttpResponse::Created().json(ApiResponse::success(timesheet)))
}

pub async fn get_timesheet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let timesheet = state.timesheet_service.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(timesheet)))
}

pub async fn get_employee_timesheets(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse> {
    let timesheets =
        state
            .timesheet_service
            .for_employee(&path.into_inner(), query.from, query.to)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(timesheets)))
}

pub async fn get_employee_summary(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse> {
    let summary = state
        .timesheet_service
        .summarize(&path.into_inner(), query.from, query.to)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

pub async fn submit_timesheet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.timesheet_service.submit(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn approve_timesheet(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<ReviewRequest>,
) -> Result<HttpResponse> {
    let outcome = state
        .timesheet_service
        .approve(&path.into_inner(), &input.approver_id)?;

    Ok(outcome_response(outcome))
}

pub async fn reject_timesheet(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<ReviewRequest>,
) -> Result<HttpResponse> {
    let outcome = state
        .timesheet_service
        .reject(&path.into_inner(), &input.approver_id)?;

    Ok(outcome_response(outcome))
}
