//! panos-rs Core Library
//!
//! Shared types, wire format, and errors for the panos-rs PAN-OS XML API
//! client. This crate is used by both the client library and the CLI.

pub mod devtime;
pub mod error;
pub mod hierarchy;
pub mod types;
pub mod xmlapi;

// Re-export commonly used types
pub use error::*;
pub use hierarchy::{DgHierarchy, DgHierarchyResult, DgNode};
pub use types::*;
pub use xmlapi::OpCommand;
