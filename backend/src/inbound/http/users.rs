//! Users API handler.
//!
//! ```text
//! GET /api/v1/users
//! ```
//!
//! The route answers every HTTP method identically and never reads the
//! request body, query string or headers.

use actix_web::{Resource, web};
use tracing::warn;

use crate::domain::SafeUserView;
use crate::inbound::http::error::{ApiError, ErrorPayload};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every registered user reduced to its public fields.
///
/// Responds `200` with a JSON array in backend order, or `500` with
/// `{"error": message}` when the identity backend call fails.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [SafeUserView]),
        (status = 500, description = "Identity backend failure", body = ErrorPayload)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<SafeUserView>>> {
    let users = state.users.list_safe_users().await.map_err(|err| {
        warn!(error = %err, "listing users failed");
        ApiError::from(err)
    })?;
    Ok(web::Json(users))
}

/// Mount [`list_users`] at `/users` for every HTTP method.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_directory::inbound::http::users::users_resource;
///
/// let app = App::new().service(web::scope("/api/v1").service(users_resource()));
/// ```
pub fn users_resource() -> Resource {
    web::resource("/users").to(list_users)
}
