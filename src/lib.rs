//! Bookshelf Application Library
//!
//! The book form controller and everything it needs: record model, form,
//! validation, REST-backed book API and table rendering.

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;
