//! # formx-core
//!
//! Core types shared by every formx-rs crate. This crate has no framework
//! dependencies and provides the foundation for the HTTP, forms, and macro crates.
//!
//! ## Modules
//!
//! - [`error`] - The [`FormxError`] taxonomy and result alias
//! - [`settings`] - Process configuration
//! - [`settings_loader`] - Loading [`Settings`] from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Utility types (`MultiValueDict`)

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormxError, FormxResult};
pub use settings::{FormSettings, Settings};
