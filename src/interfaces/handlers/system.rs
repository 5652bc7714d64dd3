use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};

use crate::AppState;

pub const AVAILABLE_ENDPOINTS: [&str; 5] = [
    "GET /api/health",
    "GET /api",
    "POST /api/contact",
    "GET /api/projects",
    "GET /api/skills",
];

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub uptime: f64,
    pub uptime_human: String,
    pub environment: String,
    pub database: String,
    pub version: String,
    pub memory_usage: String,
}

fn process_memory_usage() -> String {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return "Unknown".to_string();
    };

    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid).map_or("Unknown".to_string(), |p| {
        format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
    })
}

async fn build_health_response(state: &AppState) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime = now_utc
        .signed_duration_since(state.started_at)
        .to_std()
        .unwrap_or(Duration::ZERO);
    // Whole seconds keep the human form readable
    let human_uptime = format_duration(Duration::from_secs(uptime.as_secs()));

    let db_status = match state.store.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "Unavailable"
        }
    };

    HealthCheckResponse {
        status: "OK".to_string(),
        message: format!("{} is running", state.config.name),
        timestamp: now_utc.to_rfc3339(),
        uptime: uptime.as_secs_f64(),
        uptime_human: human_uptime.to_string(),
        environment: state.config.env.to_string(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        memory_usage: process_memory_usage(),
    }
}

/// Liveness probe. Always answers 200; a dead database only shows up in
/// the `database` field.
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(build_health_response(&state).await)
}

pub async fn api_docs(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Welcome to the {}", state.config.name),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /api/health",
            "contact": {
                "submit": "POST /api/contact",
                "getAll": "GET /api/contact",
                "getById": "GET /api/contact/{id}",
                "updateStatus": "PUT /api/contact/{id}/status",
                "delete": "DELETE /api/contact/{id}"
            },
            "projects": {
                "getAll": "GET /api/projects",
                "getById": "GET /api/projects/{id}",
                "create": "POST /api/projects",
                "update": "PUT /api/projects/{id}",
                "delete": "DELETE /api/projects/{id}"
            },
            "skills": {
                "getAll": "GET /api/skills",
                "getByCategory": "GET /api/skills/category/{category}",
                "getById": "GET /api/skills/{id}",
                "create": "POST /api/skills",
                "update": "PUT /api/skills/{id}",
                "delete": "DELETE /api/skills/{id}"
            }
        },
        "technologies": ["Rust", "actix-web", "PostgreSQL", "sqlx"]
    }))
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Endpoint not found",
        "availableEndpoints": AVAILABLE_ENDPOINTS,
    }))
}
