//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern:
//!
//! - **identity**: reqwest-backed client for the identity backend's admin
//!   API, implementing [`crate::domain::ports::UserDirectory`]
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
