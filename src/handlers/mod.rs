pub mod loans;
pub mod payslips;
pub mod rule_sets;
pub mod shared;
pub mod timesheets;

use actix_web::HttpResponse;
use serde::Serialize;

use crate::database::models::TransitionOutcome;
use shared::ApiResponse;

/// Guarded actions answer 200 either way; a refused guard carries its reason
/// in the message as well as in the body.
pub(crate) fn outcome_response<T: Serialize>(outcome: TransitionOutcome<T>) -> HttpResponse {
    match outcome.reason {
        None => HttpResponse::Ok().json(ApiResponse::success(outcome)),
        Some(reason) => {
            let message = format!("No change: {}", reason);
            HttpResponse::Ok().json(ApiResponse::success_with_message(outcome, &message))
        }
    }
}
