//! Reqwest-backed identity backend adapter.
//!
//! This adapter owns transport details only: credential headers, timeout and
//! HTTP error mapping, and JSON decoding into domain records. One call maps
//! to one `GET` against the admin users endpoint; no pagination parameters
//! are sent and no retries are attempted.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use super::dto::{ErrorBodyDto, ListUsersResponseDto};
use crate::config::IdentityBackendConfig;
use crate::domain::UserRecord;
use crate::domain::ports::{UserDirectory, UserDirectoryError};

const ADMIN_USERS_PATH: &str = "auth/v1/admin/users";
const API_KEY_HEADER: &str = "apikey";
const DEFAULT_USER_AGENT: &str = "user-directory/0.1";

/// Errors raised while constructing an [`HttpUserDirectory`].
#[derive(Debug, Error)]
pub enum HttpUserDirectoryBuildError {
    /// The service-role key contains bytes that are not valid in a header.
    #[error("service role key is not a valid header value")]
    InvalidKey,
    /// The admin endpoint could not be derived from the base URL.
    #[error("cannot derive admin users endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Directory adapter that lists users through the admin REST API.
pub struct HttpUserDirectory {
    client: Client,
    endpoint: Url,
}

impl HttpUserDirectory {
    /// Build an adapter whose client carries the service-role credential on
    /// every request.
    ///
    /// ```rust,ignore
    /// let directory = HttpUserDirectory::new(&config.backend)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the key cannot be encoded as a header, the
    /// endpoint cannot be joined onto the base URL, or the reqwest client
    /// cannot be constructed.
    pub fn new(config: &IdentityBackendConfig) -> Result<Self, HttpUserDirectoryBuildError> {
        let key = config.service_role_key.expose();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|_| HttpUserDirectoryBuildError::InvalidKey)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| HttpUserDirectoryBuildError::InvalidKey)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: admin_users_endpoint(&config.base_url)?,
        })
    }

    /// Endpoint this adapter calls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let users = parse_users(body.as_ref())?;
        debug!(count = users.len(), "identity backend listed users");
        Ok(users)
    }
}

/// Join the admin path onto the project URL, keeping any path prefix.
fn admin_users_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ADMIN_USERS_PATH)
}

fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, UserDirectoryError> {
    let decoded: ListUsersResponseDto = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid list users payload: {error}"))
    })?;
    Ok(decoded.into_domain_users())
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    UserDirectoryError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let message = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
        .unwrap_or_else(|| {
            let preview = body_preview(body);
            if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                preview
            }
        });
    UserDirectoryError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Mapping helpers are tested directly; the HTTP path runs against an
    //! httpmock server standing in for the identity backend.

    use super::*;
    use crate::config::ServiceRoleKey;
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use std::time::Duration;

    const KEY: &str = "service-role-secret";

    fn config_for(base_url: &str) -> IdentityBackendConfig {
        IdentityBackendConfig {
            base_url: Url::parse(base_url).expect("valid base url"),
            service_role_key: ServiceRoleKey::new(KEY),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[rstest]
    #[case::bare_host("https://project.example.invalid", "https://project.example.invalid/auth/v1/admin/users")]
    #[case::trailing_slash("https://project.example.invalid/", "https://project.example.invalid/auth/v1/admin/users")]
    #[case::path_prefix("http://127.0.0.1:54321/proxy", "http://127.0.0.1:54321/proxy/auth/v1/admin/users")]
    fn joins_admin_path_onto_base(#[case] base: &str, #[case] expected: &str) {
        let endpoint =
            admin_users_endpoint(&Url::parse(base).expect("valid base")).expect("joinable");
        assert_eq!(endpoint.as_str(), expected);
    }

    #[rstest]
    #[case::msg(r#"{"code":401,"msg":"invalid JWT"}"#, "invalid JWT")]
    #[case::message(r#"{"message":"unauthorized"}"#, "unauthorized")]
    #[case::description(r#"{"error":"x","error_description":"token expired"}"#, "token expired")]
    #[case::error_only(r#"{"error":"not_admin"}"#, "not_admin")]
    #[case::blank_msg_skipped(r#"{"msg":"  ","message":"forbidden"}"#, "forbidden")]
    #[case::plain_text("upstream   gateway\nfailure", "upstream gateway failure")]
    #[case::empty("", "status 502")]
    fn extracts_upstream_message(#[case] body: &str, #[case] expected: &str) {
        let error = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert_eq!(error, UserDirectoryError::rejected(502, expected));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let error = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes());
        assert_eq!(error.message().chars().count(), 163);
        assert!(error.message().ends_with("..."));
    }

    #[test]
    fn parses_users_and_ignores_unknown_fields() {
        let body = r#"{
            "aud": "authenticated",
            "users": [
                {
                    "id": "1",
                    "aud": "authenticated",
                    "email": "a@x.com",
                    "phone": null,
                    "app_metadata": { "provider": "email" },
                    "user_metadata": { "name": "Ann" }
                },
                { "id": "2", "phone": "555" }
            ]
        }"#;

        let users = parse_users(body.as_bytes()).expect("payload decodes");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email.as_deref(), Some("a@x.com"));
        assert_eq!(users[0].user_metadata.name(), Some(&json!("Ann")));
        assert_eq!(users[1].email, None);
        assert_eq!(users[1].phone.as_deref(), Some("555"));
        assert!(users[1].user_metadata.name().is_none());
    }

    #[test]
    fn missing_users_key_is_an_empty_list() {
        let users = parse_users(b"{}").expect("payload decodes");
        assert!(users.is_empty());
    }

    #[rstest]
    #[case::not_json("<html>oops</html>")]
    #[case::missing_id(r#"{"users":[{"email":"a@x.com"}]}"#)]
    fn malformed_payloads_map_to_decode(#[case] body: &str) {
        let error = parse_users(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(error, UserDirectoryError::Decode { .. }));
    }

    #[test]
    fn control_characters_in_key_are_rejected() {
        let mut config = config_for("https://project.example.invalid");
        config.service_role_key = ServiceRoleKey::new("bad\nkey");
        assert!(matches!(
            HttpUserDirectory::new(&config),
            Err(HttpUserDirectoryBuildError::InvalidKey)
        ));
    }

    #[tokio::test]
    async fn sends_service_role_credentials_to_admin_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/auth/v1/admin/users")
                    .header("apikey", KEY)
                    .header("authorization", format!("Bearer {KEY}"));
                then.status(200).json_body(json!({
                    "users": [
                        { "id": "1", "email": "a@x.com", "phone": null,
                          "user_metadata": { "name": "Ann" } }
                    ]
                }));
            })
            .await;
        let directory = HttpUserDirectory::new(&config_for(&server.base_url()))
            .expect("adapter builds");

        let users = directory.list_users().await.expect("listing succeeds");

        mock.assert_async().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "1");
    }

    #[tokio::test]
    async fn forwards_upstream_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/auth/v1/admin/users");
                then.status(401).json_body(json!({ "message": "unauthorized" }));
            })
            .await;
        let directory = HttpUserDirectory::new(&config_for(&server.base_url()))
            .expect("adapter builds");

        let error = directory.list_users().await.expect_err("listing fails");

        assert_eq!(error, UserDirectoryError::rejected(401, "unauthorized"));
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_transport() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);
        let directory = HttpUserDirectory::new(&config_for(&format!("http://{addr}")))
            .expect("adapter builds");

        let error = directory.list_users().await.expect_err("listing fails");

        assert!(matches!(error, UserDirectoryError::Transport { .. }));
    }
}
