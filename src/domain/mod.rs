//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod pattern;
pub mod reference;

// Re-export commonly used types
pub use pattern::BundlePattern;
pub use reference::{Digest, DigestChange, ReferenceKey, ResolutionTable};
