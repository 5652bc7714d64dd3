use actix_web::web;
use crate::handlers::{skills, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(
                web::resource("")
                    .route(web::get().to(skills::list_skills))
                    .route(web::post().to(skills::create_skill))
                    .default_service(web::route().to(system::not_found))
            )
            // Registered ahead of /{skill_id} so "category" is never taken for an id
            .service(
                web::resource("/category/{category}")
                    .route(web::get().to(skills::list_skills_by_category))
                    .default_service(web::route().to(system::not_found))
            )
            .service(
                web::resource("/{skill_id}")
                    .route(web::get().to(skills::get_skill))
                    .route(web::put().to(skills::update_skill))
                    .route(web::delete().to(skills::delete_skill))
                    .default_service(web::route().to(system::not_found))
            )
    );
}
