//! Domain ports defining the edges of the hexagon.
//!
//! [`UserDirectory`] is driven by the domain and implemented by the identity
//! backend adapter. [`UsersQuery`] drives the domain from inbound adapters.
//! Both expose typed errors so adapters map their failures into predictable
//! variants.

mod user_directory;
mod users_query;

#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
