//! Core domain entities.
//!
//! - [`UrlEntity`] - A shortened URL with its secret administration key

pub mod url;

pub use url::UrlEntity;
