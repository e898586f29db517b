use actix_web::web;

use crate::handlers::rule_sets;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rule-sets")
            .route("", web::post().to(rule_sets::create_rule_set))
            .route("/{id}", web::get().to(rule_sets::get_rule_set))
            .route("/{id}", web::put().to(rule_sets::update_rule_set)),
    );
}
