//! # wiki-harvest
//!
//! Library for harvesting the complete set of content URLs of a
//! MediaWiki-family site through its public query API, feeding a wget-style
//! downloader in a web-archival pipeline.
//!
//! ## Design Philosophy
//!
//! wiki-harvest is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicitly configured** - Downloader path, bind address, retry policy
//!   and page size are all passed in; nothing is read from process globals
//! - **Sequential by contract** - One item, list-by-list, page-by-page;
//!   scheduling across items belongs to the caller
//!
//! ## Quick Start
//!
//! ```no_run
//! use wiki_harvest::{HarvestConfig, ItemDescriptor, WikiHarvester};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let harvester = WikiHarvester::new(HarvestConfig::default())?;
//!     let item = ItemDescriptor::parse(
//!         "mediawiki:example.com/api.php:example.com/wiki/",
//!     )?;
//!
//!     // Every URL the site exposes, in discovery order, merged into the
//!     // downloader's argument set.
//!     let args = harvester.downloader_args(&item).await?;
//!     println!("{}", args.join(" "));
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Downloader argument assembly
pub mod assembler;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Runaway-pagination detection
pub mod guard;
/// Core harvester implementation
pub mod harvester;
/// Work-item identifier parsing
pub mod item;
/// Catalog of enumerable API lists
pub mod lists;
/// Query API pagination
pub mod paginator;
/// Retry logic for connection failures
pub mod retry;

// Re-export commonly used types
pub use assembler::downloader_args;
pub use config::{HarvestConfig, RetryConfig};
pub use error::{Error, Result};
pub use guard::LoopGuard;
pub use harvester::WikiHarvester;
pub use item::{ItemDescriptor, SiteType};
pub use lists::ListSpec;
pub use retry::IsRetryable;
