use actix_web::web;

use crate::handlers::payslips;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payslips")
            .route("", web::post().to(payslips::issue_payslip))
            .route("", web::get().to(payslips::get_payslips))
            .route("/batch", web::post().to(payslips::issue_batch))
            .route("/signed", web::get().to(payslips::get_signed_payslips))
            .route(
                "/unsigned-published",
                web::get().to(payslips::get_unsigned_published),
            )
            .route("/{id}", web::get().to(payslips::get_payslip))
            .route("/{id}/confirm", web::post().to(payslips::confirm_payslip))
            .route("/{id}/publish", web::post().to(payslips::publish_payslip))
            .route("/{id}/sign", web::post().to(payslips::sign_payslip))
            .route("/{id}/confirm-paid", web::post().to(payslips::confirm_paid))
            .route(
                "/{id}/record-payment",
                web::post().to(payslips::record_payment),
            )
            .route(
                "/{id}/acknowledge",
                web::post().to(payslips::acknowledge_payslip),
            ),
    )
    .service(
        web::scope("/payroll-runs")
            .route("", web::post().to(payslips::lock_run))
            .route("", web::get().to(payslips::get_runs))
            .route("/{id}", web::get().to(payslips::get_run)),
    );
}
