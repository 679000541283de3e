//! User records read from the identity backend and their public projection.
//!
//! The identity backend owns [`UserRecord`]; this service only reads it and
//! derives a fresh [`SafeUserView`] per request. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Name emitted when a user's metadata carries no `name`.
pub const MISSING_NAME: &str = "NULL";

/// Free-form metadata bag attached to an upstream account.
///
/// The backend lets clients store arbitrary JSON here, so the bag is kept as
/// a raw [`Value`] and only the `name` key is ever read. A bag that is absent,
/// `null`, or not an object behaves as if it had no keys.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use user_directory::domain::UserMetadata;
///
/// let metadata = UserMetadata::from(json!({ "name": "Ann", "plan": "pro" }));
/// assert_eq!(metadata.name(), Some(&json!("Ann")));
/// assert!(UserMetadata::default().name().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserMetadata(Value);

impl UserMetadata {
    /// Return the `name` entry when it is present and not JSON `null`.
    pub fn name(&self) -> Option<&Value> {
        self.0.get("name").filter(|value| !value.is_null())
    }
}

impl From<Value> for UserMetadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Resolve the public display name for a metadata bag.
///
/// Returns the stored `name` unchanged, or [`MISSING_NAME`] when the key is
/// absent or `null`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use user_directory::domain::{UserMetadata, resolve_display_name};
///
/// assert_eq!(resolve_display_name(&UserMetadata::from(json!({}))), json!("NULL"));
/// ```
pub fn resolve_display_name(metadata: &UserMetadata) -> Value {
    metadata
        .name()
        .cloned()
        .unwrap_or_else(|| Value::String(MISSING_NAME.to_owned()))
}

/// Account as reported by the identity backend's admin API.
///
/// Only the fields this service reads are modelled; everything else the
/// backend returns is dropped at the adapter boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Backend-assigned unique identifier.
    pub id: String,
    /// Primary email address, if the account has one.
    pub email: Option<String>,
    /// Phone number, if the account has one.
    pub phone: Option<String>,
    /// Client-writable metadata bag.
    pub user_metadata: UserMetadata,
}

/// Public-safe projection of a [`UserRecord`].
///
/// ## Invariants
/// - `id`, `email` and `phone` are copied verbatim from the record.
/// - `name` is the metadata `name` or [`MISSING_NAME`]; no other metadata
///   key is ever carried over.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use user_directory::domain::{SafeUserView, UserMetadata, UserRecord};
///
/// let view = SafeUserView::from(UserRecord {
///     id: "2".into(),
///     email: None,
///     phone: Some("555".into()),
///     user_metadata: UserMetadata::from(json!({})),
/// });
/// assert_eq!(
///     serde_json::to_value(&view).unwrap(),
///     json!({ "id": "2", "email": null, "phone": "555", "name": "NULL" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SafeUserView {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Email address, or `null` when the account has none.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Phone number, or `null` when the account has none.
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
    /// Display name from metadata, or `"NULL"` when unset.
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub name: Value,
}

impl From<UserRecord> for SafeUserView {
    fn from(record: UserRecord) -> Self {
        let name = resolve_display_name(&record.user_metadata);
        Self {
            id: record.id,
            email: record.email,
            phone: record.phone,
            name,
        }
    }
}
