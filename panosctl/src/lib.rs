//! panosctl library
//!
//! Command-line client for PAN-OS Panorama operational commands: VM auth
//! key management and device-group hierarchy inspection and moves.

pub mod cli;
pub mod config;
pub mod format;
