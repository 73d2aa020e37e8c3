//! # Tika SDK
//!
//! Rust client for the Apache Tika content-extraction server.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tika_sdk::TikaClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TikaClient::new("http://localhost:9998")?;
//!
//!     let pdf = std::fs::read("report.pdf")?;
//!     let mime = client.detect_type(pdf.clone(), "report.pdf").await?;
//!     let text = client.parse(pdf, Some(mime.as_str())).await?;
//!     println!("{text}");
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod metadata;
mod models;
pub mod text;

pub use client::{TikaClient, TikaClientBuilder};
pub use config::{TikaConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR};
pub use error::{Result, TikaError};
pub use metadata::parse_metadata;
pub use models::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
