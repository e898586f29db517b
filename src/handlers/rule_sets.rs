use actix_web::{web, HttpResponse, Result};

use crate::database::models::AttendanceRuleSetInput;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

pub async fn create_rule_set(
    state: web::Data<AppState>,
    input: web::Json<AttendanceRuleSetInput>,
) -> Result<HttpResponse> {
    let rule_set = state
        .timesheet_service
        .create_rule_set(input.into_inner())?;

    Ok(HttpResponse::Created().json(ApiResponse::success(rule_set)))
}

pub async fn get_rule_set(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let rule_set = state.timesheet_service.get_rule_set(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rule_set)))
}

/// Rejected with 409 once any timesheet was computed against the rule set.
pub async fn update_rule_set(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<AttendanceRuleSetInput>,
) -> Result<HttpResponse> {
    let rule_set = state
        .timesheet_service
        .update_rule_set(&path.into_inner(), input.into_inner())?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rule_set)))
}
