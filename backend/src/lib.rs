//! User directory service.
//!
//! Lists every account registered with an identity backend using a
//! service-role credential and returns them reduced to public-safe fields.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
