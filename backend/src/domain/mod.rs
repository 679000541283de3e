//! Domain primitives and use-cases.
//!
//! Purpose: Define the user model read from the identity backend, its
//! public-safe projection, and the ports and service that connect them.
//! Types here are transport agnostic; adapters translate at the edges.
//!
//! Public surface:
//! - UserRecord / UserMetadata: account data as read from the backend.
//! - SafeUserView: public projection returned to callers.
//! - UserListService: use-case implementing [`ports::UsersQuery`].

pub mod ports;
pub mod user;
pub mod user_listing;

pub use self::user::{
    MISSING_NAME, SafeUserView, UserMetadata, UserRecord, resolve_display_name,
};
pub use self::user_listing::{UserListService, project_users};
