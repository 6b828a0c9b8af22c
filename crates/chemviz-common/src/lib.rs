//! ChemViz Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the ChemViz workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all ChemViz workspace members:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Checksums**: Integrity digests for stored source files
//! - **Logging**: Centralized `tracing` subscriber configuration
//! - **Types**: Small shared value types such as [`types::HistoryLimit`]
//!
//! # Example
//!
//! ```no_run
//! use chemviz_common::checksum::{sha256_hex, verify_sha256};
//!
//! fn check(bytes: &[u8], expected: &str) -> chemviz_common::Result<()> {
//!     verify_sha256(bytes, expected)?;
//!     println!("digest ok: {}", sha256_hex(bytes));
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CommonError, Result};
