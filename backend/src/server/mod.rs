//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_directory::Trace;
#[cfg(debug_assertions)]
use user_directory::doc::ApiDoc;
use user_directory::domain::UserListService;
use user_directory::inbound::http::health::{HealthState, live, ready};
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::users::users_resource;
use user_directory::outbound::identity::HttpUserDirectory;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(users_resource());

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server serving the users endpoint.
///
/// The identity backend client is built once here and shared by every
/// worker.
///
/// # Errors
/// Propagates [`std::io::Error`] when the backend client cannot be built,
/// or when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { backend, bind_addr } = config;
    let directory = HttpUserDirectory::new(&backend).map_err(|err| {
        std::io::Error::other(format!("identity backend client setup failed: {err}"))
    })?;
    info!(endpoint = %directory.endpoint(), "identity backend configured");

    let users = UserListService::new(Arc::new(directory));
    let http_state = web::Data::new(HttpState::new(Arc::new(users)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
