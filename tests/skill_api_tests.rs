
use actix_web::{http::StatusCode, test};
use portfolio_api::build_app;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn create_skill_applies_defaults() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/skills")
        .set_json(valid_skill())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Skill created successfully");
    assert_eq!(body["data"]["name"], "Rust");
    assert_eq!(body["data"]["level"], 85);
    assert_eq!(body["data"]["color"], "#007BFF");
    assert_eq!(body["data"]["order"], 0);
    assert_eq!(body["data"]["status"], "active");
}

#[actix_rt::test]
async fn invalid_skill_reports_each_field() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/skills")
        .set_json(json!({
            "name": "R",
            "category": "cooking",
            "level": 140,
            "color": "blue"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let mut fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    fields.sort();
    assert_eq!(fields, vec!["category", "color", "level", "name"]);
}

#[actix_rt::test]
async fn skills_are_ordered_by_order_then_name() {
    let app = test::init_service(build_app(test_state())).await;

    for (name, order) in [("TypeScript", 1), ("Rust", 1), ("SQL", 0)] {
        let mut payload = valid_skill();
        payload["name"] = json!(name);
        payload["order"] = json!(order);
        let req = test::TestRequest::post()
            .uri("/api/skills")
            .set_json(payload)
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/skills").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["data"].as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();

    assert_eq!(body["count"], 3);
    assert_eq!(names, vec!["SQL", "Rust", "TypeScript"]);
}

#[actix_rt::test]
async fn category_route_returns_only_active_skills_of_that_category() {
    let app = test::init_service(build_app(test_state())).await;

    let fixtures = [
        ("Rust", "backend", "active"),
        ("Perl", "backend", "inactive"),
        ("CSS", "frontend", "active"),
    ];
    for (name, category, status) in fixtures {
        let mut payload = valid_skill();
        payload["name"] = json!(name);
        payload["category"] = json!(category);
        payload["status"] = json!(status);
        let req = test::TestRequest::post()
            .uri("/api/skills")
            .set_json(payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/skills/category/backend").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Rust");

    let req = test::TestRequest::get().uri("/api/skills?category=backend").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);

    let req = test::TestRequest::get().uri("/api/skills/category/cooking").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 0);
}

#[actix_rt::test]
async fn skill_update_and_delete_round() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/skills")
        .set_json(valid_skill())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/skills/{}", created["data"]["id"].as_str().unwrap());

    let mut replacement = valid_skill();
    replacement["level"] = json!(95);
    replacement["color"] = json!("#DEA584");
    let req = test::TestRequest::put().uri(&uri).set_json(replacement).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Skill updated successfully");
    assert_eq!(body["data"]["level"], 95);
    assert_eq!(body["data"]["color"], "#DEA584");

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Skill deleted successfully");

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Skill not found");
}

#[actix_rt::test]
async fn wrongly_typed_level_is_itemized_with_other_violations() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/skills")
        .set_json(json!({ "name": "R", "category": "backend", "level": "high" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["level", "name"]);
    assert_eq!(errors[0]["message"], "Level must be between 0 and 100");
}
