//! Shared types, error model, and configuration for tokentint.
//!
//! This crate is the foundation depended on by all other tokentint crates.
//! It provides:
//! - [`TokenTintError`] — the unified error type
//! - The color model ([`Color`], mixing, hex parsing)
//! - Domain types ([`TokenRecord`], [`ColorTriple`], [`TokenOutcome`], [`FieldNames`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], config loading)

pub mod color;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use color::{Color, MIX_DEFAULT_RATIO};
pub use config::{
    AppConfig, FetchConfig, FetchSection, FieldsSection, OutputSection, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, TokenTintError};
pub use types::{
    AVERAGE_COLOR_KEY, ColorTriple, DERIVED_COLOR_KEYS, DOMINANT1_COLOR_KEY, DOMINANT2_COLOR_KEY,
    FieldNames, TokenOutcome, TokenRecord, record_from_object, record_into_value,
};
