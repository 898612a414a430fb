//! Unified error types for the OLEDS decoders.
//!
//! All decoders report failures through one error kind so that callers can
//! treat any non-conforming stream the same way.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Corruption, Error, Result};
