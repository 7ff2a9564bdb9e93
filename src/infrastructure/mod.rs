//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Storage adapters for [`crate::domain::repositories::UrlRepository`]

pub mod persistence;
