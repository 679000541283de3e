//! DTOs for decoding admin API responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records (`UserRecord`) in one pass. Fields the service never reads are
//! ignored by serde.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{UserMetadata, UserRecord};

#[derive(Debug, Deserialize)]
pub(super) struct ListUsersResponseDto {
    #[serde(default)]
    pub(super) users: Vec<UserDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) phone: Option<String>,
    #[serde(default)]
    pub(super) user_metadata: Value,
}

impl ListUsersResponseDto {
    pub(super) fn into_domain_users(self) -> Vec<UserRecord> {
        self.users.into_iter().map(UserDto::into_domain_user).collect()
    }
}

impl UserDto {
    fn into_domain_user(self) -> UserRecord {
        UserRecord {
            id: self.id,
            email: self.email,
            phone: self.phone,
            user_metadata: UserMetadata::from(self.user_metadata),
        }
    }
}

/// Error body shapes returned by the admin API.
///
/// Different endpoints report the message under different keys; the first
/// non-blank one wins.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn into_message(self) -> Option<String> {
        [self.msg, self.message, self.error_description, self.error]
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty())
    }
}
