//! # findt-core
//!
//! Error definitions and process-wide settings for findt.
//!
//! This crate provides the pieces shared across the workspace: the error
//! hierarchy with its `ensure!` macro, and `Settings`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Global library settings (weekday-name language).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Signed day count used to size a period from its start date.
pub type DayCount = i32;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Bound, Error, Result};
pub use settings::{Language, Settings};
