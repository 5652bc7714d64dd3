use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, StatusCode},
    middleware::{ErrorHandlers, NormalizePath},
    web, App, Error,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{db, limiter, utils};

use limiter::rate_limiter::FixedWindowLimiter;
use middlewares::{error_mask::mask_internal_error, security_headers::security_headers};
use repositories::store::StoreHealth;
use routes::json_error::{form_config, json_config, query_config};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{contact::ContactHandler, projects::ProjectHandler, skills::SkillHandler};

pub struct AppState {
    pub config: AppConfig,
    pub started_at: DateTime<Utc>,
    pub contact_handler: ContactHandler,
    pub project_handler: ProjectHandler,
    pub skill_handler: SkillHandler,
    pub store: Arc<dyn StoreHealth>,
    pub contact_limiter: FixedWindowLimiter,
}

impl AppState {
    pub fn new(config: AppConfig, repos: SharedRepositories) -> Self {
        let contact_limiter = FixedWindowLimiter::new(
            config.contact_rate_limit_max,
            config.contact_rate_limit_window(),
        );

        AppState {
            started_at: Utc::now(),
            contact_handler: ContactHandler::new(repos.contact_repo),
            project_handler: ProjectHandler::new(repos.project_repo),
            skill_handler: SkillHandler::new(repos.skill_repo),
            store: repos.store,
            contact_limiter,
            config,
        }
    }
}

fn cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(3600);

    // Browsers refuse credentials alongside a wildcard origin
    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}

/// Full application: middleware stack, API routes and the 404 fallback.
/// Shared by the server binary and the integration tests.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let body_limit = state.config.body_limit_bytes;
    let cors = cors(&state.config);

    App::new()
        .app_data(state)
        .app_data(json_config(body_limit))
        .app_data(form_config(body_limit))
        .app_data(query_config())
        .wrap(ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, mask_internal_error))
        .wrap(security_headers())
        .wrap(cors)
        .wrap(NormalizePath::trim())
        .wrap(TracingLogger::default())
        .configure(routes::configure_routes)
        .default_service(web::route().to(handlers::system::not_found))
}
