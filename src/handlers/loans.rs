use actix_web::{web, HttpResponse, Result};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::database::models::{CappedDeductionInput, CreateLoanInput, DeductionInput};
use crate::handlers::outcome_response;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuery {
    pub employee_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPayQuery {
    pub net_pay: BigDecimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CappedDeductionQuote {
    pub loan_id: String,
    pub net_pay: BigDecimal,
    pub amount: BigDecimal,
}

pub async fn create_loan(
    state: web::Data<AppState>,
    input: web::Json<CreateLoanInput>,
) -> Result<HttpResponse> {
    let loan = state.loan_service.create_loan(input.into_inner())?;
    Ok(HttpResponse::Created().json(ApiResponse::success(loan)))
}

pub async fn get_loans(
    state: web::Data<AppState>,
    query: web::Query<LoanQuery>,
) -> Result<HttpResponse> {
    let loans = state.loan_service.loans_for_employee(&query.employee_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(loans)))
}

pub async fn get_loan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let loan = state.loan_service.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(loan)))
}

/// Deductions across every loan, newest first.
pub async fn get_all_deductions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let deductions = state.loan_service.get_all_deductions()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(deductions)))
}

pub async fn record_deduction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<DeductionInput>,
) -> Result<HttpResponse> {
    let result = state
        .loan_service
        .record_deduction(&path.into_inner(), input.into_inner())?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

pub async fn record_capped_deduction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<CappedDeductionInput>,
) -> Result<HttpResponse> {
    let result = state
        .loan_service
        .record_capped_deduction(&path.into_inner(), input.into_inner())?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

pub async fn quote_capped_deduction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<NetPayQuery>,
) -> Result<HttpResponse> {
    let loan_id = path.into_inner();
    let NetPayQuery { net_pay } = query.into_inner();
    let amount = state
        .loan_service
        .compute_capped_deduction(&loan_id, &net_pay)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CappedDeductionQuote {
        loan_id,
        net_pay,
        amount,
    })))
}

pub async fn freeze_loan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.loan_service.freeze(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn unfreeze_loan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.loan_service.unfreeze(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn cancel_loan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let outcome = state.loan_service.cancel(&path.into_inner())?;
    Ok(outcome_response(outcome))
}

pub async fn generate_schedule(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let schedule = state.loan_service.generate_schedule(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(schedule)))
}

pub async fn get_schedule(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let schedule = state.loan_service.get_schedule(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(schedule)))
}

pub async fn get_balance_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let history = state.loan_service.get_balance_history(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}
