//! Utility functions for key generation and URL validation.
//!
//! - [`key_generator`] - Random key generation and custom key validation
//! - [`url_validator`] - Target URL safety checks

pub mod key_generator;
pub mod url_validator;
