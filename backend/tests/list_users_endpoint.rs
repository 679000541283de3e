//! End-to-end tests for `/api/v1/users` against a fake identity backend.
//!
//! The real reqwest adapter talks to an httpmock server, so these cover the
//! full path from inbound request to upstream call and back.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use httpmock::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use url::Url;

use user_directory::Trace;
use user_directory::config::{IdentityBackendConfig, ServiceRoleKey};
use user_directory::domain::{SafeUserView, UserListService};
use user_directory::inbound::http::ErrorPayload;
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::users::users_resource;
use user_directory::outbound::identity::HttpUserDirectory;

const SERVICE_ROLE_KEY: &str = "sb-service-role-test-key";
const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";

#[fixture]
fn scenario_users() -> Value {
    json!({
        "aud": "authenticated",
        "users": [
            {
                "id": "1",
                "email": "a@x.com",
                "phone": null,
                "role": "authenticated",
                "app_metadata": { "provider": "email", "providers": ["email"] },
                "user_metadata": { "name": "Ann", "avatar_url": "https://example.invalid/ann.png" }
            },
            {
                "id": "2",
                "email": null,
                "phone": "555",
                "user_metadata": {}
            }
        ]
    })
}

fn http_state_for(server: &MockServer) -> web::Data<HttpState> {
    let config = IdentityBackendConfig {
        base_url: Url::parse(&server.base_url()).expect("mock server url"),
        service_role_key: ServiceRoleKey::new(SERVICE_ROLE_KEY),
        request_timeout: Duration::from_secs(5),
    };
    let directory = HttpUserDirectory::new(&config).expect("adapter builds");
    let users = UserListService::new(Arc::new(directory));
    web::Data::new(HttpState::new(Arc::new(users)))
}

async fn get_users(server: &MockServer) -> (StatusCode, String) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state_for(server))
            .wrap(Trace)
            .service(web::scope("/api/v1").service(users_resource())),
    )
    .await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users?page=2&per_page=1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (
        status,
        String::from_utf8(body.to_vec()).expect("utf8 response body"),
    )
}

#[rstest]
#[actix_web::test]
async fn projects_upstream_users_in_order(scenario_users: Value) {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(ADMIN_USERS_PATH)
                .query_param_missing("page")
                .query_param_missing("per_page")
                .header("apikey", SERVICE_ROLE_KEY)
                .header("authorization", format!("Bearer {SERVICE_ROLE_KEY}"));
            then.status(200).json_body(scenario_users);
        })
        .await;

    let (status, body) = get_users(&server).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"[{"id":"1","email":"a@x.com","phone":null,"name":"Ann"},{"id":"2","email":null,"phone":"555","name":"NULL"}]"#
    );
    let views: Vec<SafeUserView> = serde_json::from_str(&body).expect("strict user views");
    assert_eq!(views.len(), 2);
    assert_eq!(views[1].name, json!("NULL"));
}

#[rstest]
#[actix_web::test]
async fn upstream_failure_becomes_error_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ADMIN_USERS_PATH);
            then.status(401).json_body(json!({ "message": "unauthorized" }));
        })
        .await;

    let (status, body) = get_users(&server).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"unauthorized"}"#);
    let payload: ErrorPayload = serde_json::from_str(&body).expect("strict error payload");
    assert_eq!(payload.error, "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn responses_never_leak_metadata_or_credentials(scenario_users: Value) {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ADMIN_USERS_PATH);
            then.status(200).json_body(scenario_users);
        })
        .await;

    let (_, body) = get_users(&server).await;

    for secret in [SERVICE_ROLE_KEY, "avatar_url", "app_metadata", "role"] {
        assert!(!body.contains(secret), "response leaked `{secret}`");
    }
}
