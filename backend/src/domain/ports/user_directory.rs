//! Driven port for reading accounts from the identity backend.
//!
//! Implementations hold the privileged service-role credential. The domain
//! only ever asks for one administrative read and never mutates accounts.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::domain::{UserMetadata, UserRecord};

/// Errors surfaced while listing accounts from the identity backend.
///
/// Every variant carries the human-readable message the backend (or the
/// transport) reported, so inbound adapters can forward it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// The request never produced a response (connect failure, timeout).
    #[error("identity backend unreachable: {message}")]
    Transport {
        /// Transport-level failure description.
        message: String,
    },
    /// The backend answered with a non-success status.
    #[error("identity backend rejected the request with status {status}: {message}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
    /// The backend answered successfully but the payload did not decode.
    #[error("identity backend response decode failed: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
}

impl UserDirectoryError {
    /// Build a [`UserDirectoryError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`UserDirectoryError::Rejected`].
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Build a [`UserDirectoryError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Upstream message without the variant's context prefix.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::ports::UserDirectoryError;
    ///
    /// let err = UserDirectoryError::rejected(401, "unauthorized");
    /// assert_eq!(err.message(), "unauthorized");
    /// ```
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Rejected { message, .. }
            | Self::Decode { message } => message,
        }
    }
}

/// Port for listing every account registered with the identity backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the accounts from a single list call, in backend order.
    ///
    /// No pagination cursor is followed: when the backend caps its page
    /// size only the first page is returned.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use user_directory::domain::ports::{FixtureUserDirectory, UserDirectory};
    ///
    /// let users = FixtureUserDirectory.list_users().await?;
    /// assert_eq!(users.len(), 1);
    /// # Ok::<(), user_directory::domain::ports::UserDirectoryError>(())
    /// ```
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError>;
}

/// Fixture directory returning one deterministic account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        Ok(vec![UserRecord {
            id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
            email: Some("ada@example.com".to_owned()),
            phone: None,
            user_metadata: UserMetadata::from(json!({ "name": "Ada Lovelace" })),
        }])
    }
}
