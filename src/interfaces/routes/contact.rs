use actix_web::web;

use crate::{
    handlers::{contact, system},
    middlewares::rate_limit::ContactRateLimit,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            // Only the submission resource is throttled
            .service(
                web::resource("")
                    .wrap(ContactRateLimit)
                    .route(web::post().to(contact::submit_contact))
                    .route(web::get().to(contact::list_contacts))
                    .default_service(web::route().to(system::not_found))
            )
            .service(
                web::resource("/{contact_id}/status")
                    .route(web::put().to(contact::update_contact_status))
                    .default_service(web::route().to(system::not_found))
            )
            .service(
                web::resource("/{contact_id}")
                    .route(web::get().to(contact::get_contact))
                    .route(web::delete().to(contact::delete_contact))
                    .default_service(web::route().to(system::not_found))
            )
    );
}
