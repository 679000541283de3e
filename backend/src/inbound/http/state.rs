//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UsersQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Public user listing use-case.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the users query port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::domain::UserListService;
    /// use user_directory::domain::ports::FixtureUserDirectory;
    /// use user_directory::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(UserListService::new(Arc::new(FixtureUserDirectory))));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>) -> Self {
        Self { users }
    }
}
