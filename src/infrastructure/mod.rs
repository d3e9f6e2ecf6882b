//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Container registry tag API (Quay)

pub mod registry;

// Re-export commonly used types
pub use registry::{DigestResolver, QuayClient};
