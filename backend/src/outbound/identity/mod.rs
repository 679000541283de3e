//! Identity backend outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `UserDirectory`
//! port against the backend's administrative users endpoint.

mod dto;
mod http_directory;

pub use http_directory::{HttpUserDirectory, HttpUserDirectoryBuildError};
