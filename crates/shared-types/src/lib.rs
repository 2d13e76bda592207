//! # Shared Types Crate
//!
//! Cross-crate value types for the GroupAuth engine. Every identifier that
//! crosses a crate boundary (code identities, member ids, channel ids,
//! digests) is defined here so the crypto and registry crates agree on one
//! representation.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers are defined once, here.
//! - **Opaque Identities**: a `CodeId` names the exact code that must have
//!   run; the engine never interprets its contents beyond the 20-byte
//!   commit/app prefix it was built from.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;

pub use entities::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
