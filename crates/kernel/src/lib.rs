//! Shared kernel for the bookshelf workspace.

pub mod settings;

pub use settings::Settings;
