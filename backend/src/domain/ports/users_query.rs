//! Driving port for the public user listing.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch the public-safe
//! user list without importing outbound concerns. Production backs it with
//! [`crate::domain::UserListService`]; handler tests use the generated mock.

use async_trait::async_trait;

use super::UserDirectoryError;
use crate::domain::SafeUserView;

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every known user reduced to its public fields, in backend
    /// order.
    async fn list_safe_users(&self) -> Result<Vec<SafeUserView>, UserDirectoryError>;
}
