use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::database::models::{
    FinanceConfirmationInput, IssuePayslipInput, LockRunInput, PaymentInput, PayslipStatus,
};
use crate::error::AppError;
use crate::handlers::outcome_response;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipQuery {
    pub status: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub signature_data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeRequest {
    pub employee_id: String,
}

pub async fn issue_payslip(
    state: web::Data<AppState>,
    input: web::Json<IssuePayslipInput>,
) -> Result<HttpResponse> {
    let payslip = state.payslip_service.issue(input.into_inner())?;
    Ok(HttpResponse::Created().json(ApiResponse::success(payslip)))
}

/// Issue a payroll batch; every payslip shares one issuedAt.
pub async fn issue_batch(
    state: web::Data<AppState>,
    input: web::Json<Vec<IssuePayslipInput>>,
) -> Result<HttpResponse> {
    let payslips = state.payslip_service.issue_batch(input.into_inner())?;
    Ok(HttpResponse::Created().json(ApiResponse::success(payslips)))
}

pub async fn get_payslips(
    state: web::Data<AppState>,
    query: web::Query<PayslipQuery>,
) -> Result<HttpResponse> {
    let payslips = match (&query.status, &query.employee_id) {
        (Some(status), employee_id) => {
            let status = status
                .parse::<PayslipStatus>()
                .map_err(|_| AppError::BadRequest(format!("Invalid status: {}", status)))?;
            let mut payslips = state.payslip_service.get_payslips_by_status(status)?;
            if let Some(employee_id) = employee_id {
                payslips.retain(|p| &p.employee_id == employee_id);
            }
            payslips
        }
        (None, Some(employee_id)) => state.payslip_service.payslips_for_employee(employee_id)?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either status or employeeId is required".to_string(),
            )
            .into());
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(payslips)))
}

pub async fn get_signed_payslips(state: web::Data<AppState>) -> Result<HttpResponse> {
    let payslips = state.payslip_service.get_signed_payslips()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payslips)))
}

pub async fn get_unsigned_published(state: web::Data<AppState>) -> Result<HttpResponse> {
    let payslips = state.payslip_service.get_unsigned_published()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payslips)))
}

pub async fn get_payslip(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let payslip = state.payslip_service.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payslip)))
}

pub async fn confirm_payslip(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.payslip_service.confirm(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn publish_payslip(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.payslip_service.publish(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn sign_payslip(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<SignRequest>,
) -> Result<HttpResponse> {
    let outcome = state
        .payslip_service
        .sign(&path.into_inner(), &input.signature_data)?;

    Ok(outcome_response(outcome))
}

pub async fn confirm_paid(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<FinanceConfirmationInput>,
) -> Result<HttpResponse> {
    let outcome = state
        .payslip_service
        .confirm_paid_by_finance(&path.into_inner(), input.into_inner())?;

    Ok(outcome_response(outcome))
}

pub async fn record_payment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<PaymentInput>,
) -> Result<HttpResponse> {
    let outcome = state
        .payslip_service
        .record_payment(&path.into_inner(), input.into_inner())?;

    Ok(outcome_response(outcome))
}

pub async fn acknowledge_payslip(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<AcknowledgeRequest>,
) -> Result<HttpResponse> {
    let outcome = state
        .payslip_service
        .acknowledge(&path.into_inner(), &input.employee_id)?;

    Ok(outcome_response(outcome))
}

// Payroll runs

pub async fn lock_run(
    state: web::Data<AppState>,
    input: web::Json<LockRunInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner();
    let outcome = state
        .payslip_service
        .lock_run(input.issued_at, &input.locked_by)?;

    Ok(outcome_response(outcome))
}

pub async fn get_runs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let runs = state.payslip_service.list_runs()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(runs)))
}

pub async fn get_run(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let run = state.payslip_service.get_run(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(run)))
}
