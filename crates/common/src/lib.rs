//! Common functionality for calling the InkyBay shop API.
//!
//! This crate provides the signed-request contract shared by the CLI and any
//! back-office route handler that proxies shop lookups to InkyBay.
//!
//! # Modules
//!
//! - [`constants`]: Header names and fixed wire values
//! - [`error`]: Error types and HTTP status mapping
//! - [`http_util`]: Turning a signed envelope into an outbound HTTP request
//! - [`logging`]: Logger setup
//! - [`relay`]: Relaying upstream status and body back to the caller
//! - [`request_signing`]: HMAC-SHA256 request signing and verification
//! - [`settings`]: Configuration loading and validation
//! - [`shop`]: Allowed operations and their request bodies
//! - [`test_support`]: Testing utilities

pub mod constants;
pub mod error;
pub mod http_util;
pub mod logging;
pub mod relay;
pub mod request_signing;
pub mod settings;
pub mod shop;
