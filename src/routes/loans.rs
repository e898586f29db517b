use actix_web::web;

use crate::handlers::loans;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/loans")
            .route("", web::post().to(loans::create_loan))
            .route("", web::get().to(loans::get_loans))
            .route("/deductions", web::get().to(loans::get_all_deductions))
            .route("/{id}", web::get().to(loans::get_loan))
            .route("/{id}/deductions", web::post().to(loans::record_deduction))
            .route(
                "/{id}/capped-deductions",
                web::post().to(loans::record_capped_deduction),
            )
            .route(
                "/{id}/capped-deduction",
                web::get().to(loans::quote_capped_deduction),
            )
            .route("/{id}/freeze", web::post().to(loans::freeze_loan))
            .route("/{id}/unfreeze", web::post().to(loans::unfreeze_loan))
            .route("/{id}/cancel", web::post().to(loans::cancel_loan))
            .route("/{id}/schedule", web::post().to(loans::generate_schedule))
            .route("/{id}/schedule", web::get().to(loans::get_schedule))
            .route("/{id}/history", web::get().to(loans::get_balance_history)),
    );
}
