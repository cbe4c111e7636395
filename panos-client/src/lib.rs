//! Typed operational-command client for PAN-OS Panorama XML APIs.
//!
//! The client issues `type=op` requests over the device's XML API and
//! interprets structured replies: generating and listing bootstrap VM auth
//! keys (with timezone-correct expiry reconstruction), flattening the
//! device-group hierarchy, and moving device groups with asynchronous
//! job-completion tracking.
//!
//! Transport is abstracted behind the [`session::Session`] trait;
//! [`session::ApiSession`] is the reqwest-backed production implementation.

pub mod client;
pub mod jobs;
pub mod session;
pub mod test_utils;

pub use client::Panorama;
pub use jobs::JobWait;
pub use session::{ApiSession, Session};
