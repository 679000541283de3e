//! Public user listing use-case.
//!
//! Calls the [`UserDirectory`] once and projects each record into a
//! [`SafeUserView`]. The output is a strict order-preserving map of the
//! directory response: nothing is filtered, sorted or deduplicated.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{UserDirectory, UserDirectoryError, UsersQuery};
use super::{SafeUserView, UserRecord};

/// Project directory records into public views, preserving order.
pub fn project_users(records: Vec<UserRecord>) -> Vec<SafeUserView> {
    records.into_iter().map(SafeUserView::from).collect()
}

/// Domain service implementing [`UsersQuery`] on top of a [`UserDirectory`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_directory::domain::UserListService;
/// use user_directory::domain::ports::FixtureUserDirectory;
///
/// let service = UserListService::new(Arc::new(FixtureUserDirectory));
/// # let _ = service;
/// ```
#[derive(Clone)]
pub struct UserListService {
    directory: Arc<dyn UserDirectory>,
}

impl UserListService {
    /// Create a service backed by the given directory.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl UsersQuery for UserListService {
    async fn list_safe_users(&self) -> Result<Vec<SafeUserView>, UserDirectoryError> {
        let records = self.directory.list_users().await?;
        debug!(count = records.len(), "projecting directory users");
        Ok(project_users(records))
    }
}
