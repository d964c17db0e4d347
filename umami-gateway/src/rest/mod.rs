//! REST client infrastructure.
//!
//! A thin, uniformly error-mapped wrapper over `reqwest`. The per-resource
//! modules at the crate root build their typed calls on [`RestClient`].

mod client;
mod config;
mod page;

pub use client::RestClient;
pub use config::{RestConfig, RestConfigBuilder};
pub use page::Page;
