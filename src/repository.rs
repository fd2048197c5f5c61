//! Content repositories
//!
//! Ports through which the loader reads folders, files and the session user,
//! plus the reqwest-backed client for the REST API.

pub mod contract;
pub mod http;

pub use contract::{AuthProvider, FileRepository, FolderRepository};
pub use http::HttpContentClient;
