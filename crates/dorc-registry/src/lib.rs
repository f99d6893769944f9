//! DigitalOcean Container Registry client for dorc
//!
//! Lists and deletes repository tags through the DigitalOcean API and
//! implements [`dorc_core::TagRegistry`] so it can drive a
//! [`dorc_core::Cleaner`].
//!
//! # Example
//!
//! ```no_run
//! use dorc_core::{Cleaner, RetentionPolicy};
//! use dorc_registry::DigitalOceanClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DigitalOceanClient::new(std::env::var("DO_TOKEN")?)?;
//!     let policy = RetentionPolicy::new().with_keep_count(5).with_dry_run(true);
//!
//!     let cleaner = Cleaner::new(client, policy);
//!     let report = cleaner
//!         .clean_repository("my-registry", "api", chrono::Utc::now())
//!         .await?;
//!
//!     for tag in report.deleted_tags() {
//!         println!("would delete {}", tag.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod bridge;
pub mod error;
pub mod registry;
mod types;

pub use error::RegistryError;
pub use registry::DigitalOceanClient;
