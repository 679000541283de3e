//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users endpoint, the health probes, and the
//! [`SafeUserView`](crate::domain::SafeUserView) and
//! [`ErrorPayload`](crate::inbound::http::ErrorPayload) schemas. The document
//! is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::SafeUserView;
use crate::inbound::http::ErrorPayload;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Lists identity backend accounts reduced to public-safe fields."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SafeUserView, ErrorPayload)),
    tags(
        (name = "users", description = "Public user listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
