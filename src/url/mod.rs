//! URL handling module for Page Analyzer
//!
//! This module provides validation of user-submitted URLs and their
//! normalization to `scheme://authority`.

mod normalize;
mod validate;

pub use normalize::normalize;
pub use validate::{is_valid_url, validate, ValidationError, ValidationErrors, MAX_URL_LENGTH};
