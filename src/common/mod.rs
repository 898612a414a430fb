//! Common types and utilities shared by the OLEDS decoders.
//!
//! This module provides the bounds-checked byte cursor every record decoder
//! reads through, and the unified error type they report.

// Submodule declarations
pub mod binary;
pub mod error;

// Re-exports for convenience
pub use binary::ByteReader;
pub use error::{Corruption, Error, Result};
