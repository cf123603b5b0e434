//! # Tutor Common Library
//!
//! Shared code for the AI Guitar Tutor backend:
//! - Song/chord catalog data model and JSON loading
//! - Common error types

pub mod catalog;
pub mod error;

pub use catalog::Catalog;
pub use error::{Error, Result};
