//! Configuration management.
//!
//! Provides format-agnostic configuration loading (YAML, TOML, JSON) with
//! environment variable override support. Concrete configuration sections
//! live next to the subsystems they configure; the composition root
//! assembles them into one document loaded through [`ConfigLoader`].

mod loader;

pub use loader::{merge_configs, ConfigFormat, ConfigLoader};
