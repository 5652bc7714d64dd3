use actix_web::web;

use crate::handlers::system;

mod contact;
mod projects;
mod skills;
pub mod json_error;

/// Every resource falls back to the JSON not-found payload for methods it
/// does not serve, so a wrong method never yields an empty 405.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("")
                    .route(web::get().to(system::api_docs))
                    .default_service(web::route().to(system::not_found))
            )
            .service(
                web::resource("/health")
                    .route(web::get().to(system::health_check))
                    .default_service(web::route().to(system::not_found))
            )
            .configure(contact::config_routes)
            .configure(projects::config_routes)
            .configure(skills::config_routes)
    );
}
