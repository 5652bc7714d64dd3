
use actix_web::{http::StatusCode, test};
use portfolio_api::{build_app, middlewares::rate_limit::CONTACT_RATE_LIMIT_MESSAGE, shared_repos::SharedRepositories};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use test_utils::*;

#[actix_rt::test]
async fn submit_contact_returns_201_with_receipt() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .insert_header(("user-agent", "integration-test"))
        .set_json(valid_contact())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key("ratelimit-limit"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thank you for your message! I will get back to you soon.");
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["timestamp"].is_string());
    assert!(body["data"].get("message").is_none());
}

#[actix_rt::test]
async fn stored_contact_keeps_origin_and_starts_unread() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .insert_header(("user-agent", "integration-test"))
        .set_json(valid_contact())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/contact/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["status"], "unread");
    assert_eq!(body["data"]["ipAddress"], TEST_CLIENT_IP);
    assert_eq!(body["data"]["userAgent"], "integration-test");
    assert_eq!(body["data"]["subject"], "Collaboration idea");
}

#[actix_rt::test]
async fn invalid_contact_lists_every_violation_and_stores_nothing() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(json!({
            "name": "R2-D2",
            "email": "not-an-email",
            "subject": "Hi"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    let mut fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    fields.sort();
    assert_eq!(fields, vec!["email", "message", "name", "subject"]);

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["count"], 0);
    assert_eq!(list["data"], json!([]));
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn sixth_submission_in_a_window_is_rejected() {
    let app = test::init_service(build_app(test_state())).await;

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .peer_addr(peer())
            .set_json(valid_contact())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(valid_contact())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("retry-after"));
    assert_eq!(resp.headers().get("ratelimit-remaining").unwrap(), "0");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": CONTACT_RATE_LIMIT_MESSAGE }));
}

#[actix_rt::test]
async fn rate_limit_runs_before_validation() {
    let app = test::init_service(build_app(test_state())).await;

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .peer_addr(peer())
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_rt::test]
async fn other_clients_and_reads_are_not_throttled() {
    let app = test::init_service(build_app(test_state())).await;

    for _ in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .peer_addr(peer())
            .set_json(valid_contact())
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr("198.51.100.77:40000".parse().unwrap())
        .set_json(valid_contact())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/contact")
        .peer_addr(peer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn submissions_resume_after_the_window() {
    let mut config = test_config();
    config.contact_rate_limit_max = 1;
    config.contact_rate_limit_window_secs = 1;
    let app = test::init_service(build_app(test_state_with(config, in_memory_repos()))).await;

    let submit = || {
        test::TestRequest::post()
            .uri("/api/contact")
            .peer_addr(peer())
            .set_json(valid_contact())
            .to_request()
    };

    assert_eq!(test::call_service(&app, submit()).await.status(), StatusCode::CREATED);
    assert_eq!(test::call_service(&app, submit()).await.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(test::call_service(&app, submit()).await.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn contacts_are_listed_newest_first() {
    let app = test::init_service(build_app(test_state())).await;

    for subject in ["First subject", "Second subject"] {
        let mut payload = valid_contact();
        payload["subject"] = json!(subject);
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .peer_addr(peer())
            .set_json(payload)
            .to_request();
        test::call_service(&app, req).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["subject"], "Second subject");
    assert_eq!(body["data"][1]["subject"], "First subject");
}

#[actix_rt::test]
async fn status_update_accepts_known_values_only() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(valid_contact())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/contact/{}/status", id))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid status value");

    let req = test::TestRequest::get()
        .uri(&format!("/api/contact/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "unread");

    let req = test::TestRequest::put()
        .uri(&format!("/api/contact/{}/status", id))
        .set_json(json!({ "status": "replied" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Status updated successfully");
    assert_eq!(body["data"]["status"], "replied");
}

#[actix_rt::test]
async fn contact_lookups_with_bad_ids_are_404() {
    let app = test::init_service(build_app(test_state())).await;

    for uri in [
        "/api/contact/not-a-uuid".to_string(),
        format!("/api/contact/{}", uuid::Uuid::new_v4()),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Contact submission not found");
    }
}

#[actix_rt::test]
async fn deleting_a_contact_twice_is_404() {
    let app = test::init_service(build_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(valid_contact())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/contact/{}", created["data"]["id"].as_str().unwrap());

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Contact submission deleted successfully");

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn store_failures_are_masked_outside_development() {
    let repos = SharedRepositories {
        contact_repo: Arc::new(BrokenContactRepo),
        ..in_memory_repos()
    };
    let app = test::init_service(build_app(test_state_with(test_config(), repos))).await;

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["error"], "Something went wrong");
}

#[actix_rt::test]
async fn store_failures_show_detail_in_development() {
    let mut config = test_config();
    config.env = portfolio_api::settings::AppEnvironment::Development;
    let repos = SharedRepositories {
        contact_repo: Arc::new(BrokenContactRepo),
        ..in_memory_repos()
    };
    let app = test::init_service(build_app(test_state_with(config, repos))).await;

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Internal server error");
    assert!(body["error"].as_str().unwrap().contains("pool timed out"));
}

#[actix_rt::test]
async fn stray_posts_do_not_use_up_the_submission_quota() {
    let app = test::init_service(build_app(test_state())).await;

    for _ in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/contact/some-id")
            .peer_addr(peer())
            .set_json(valid_contact())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr(peer())
        .set_json(valid_contact())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get("ratelimit-remaining").unwrap(), "4");
}
