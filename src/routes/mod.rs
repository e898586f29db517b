use actix_web::web;

pub mod loans;
pub mod payslips;
pub mod rule_sets;
pub mod timesheets;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(rule_sets::configure)
            .configure(timesheets::configure)
            .configure(payslips::configure)
            .configure(loans::configure),
    );
}
