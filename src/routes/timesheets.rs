use actix_web::web;

use crate::handlers::timesheets;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/timesheets")
            .route("", web::post().to(timesheets::compute_timesheet))
            .route(
                "/employee/{employee_id}",
                web::get().to(timesheets::get_employee_timesheets),
            )
            .route(
                "/employee/{employee_id}/summary",
                web::get().to(timesheets::get_employee_summary),
            )
            .route("/{id}", web::get().to(timesheets::get_timesheet))
            .route("/{id}/submit", web::post().to(timesheets::submit_timesheet))
            .route("/{id}/approve", web::post().to(timesheets::approve_timesheet))
            .route("/{id}/reject", web::post().to(timesheets::reject_timesheet)),
    );
}
