// src/config/mod.rs

//! Configuration for gazer.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load the optional `Gazer.toml` from disk and validate it (`loader.rs`).

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_and_validate, load_or_default, validate_config};
pub use model::{ConfigFile, GazerConfig};
