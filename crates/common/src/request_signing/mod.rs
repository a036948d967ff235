//! Request signing utilities for calls to the InkyBay shop API.
//!
//! This module provides HMAC-SHA256 signing over a canonical request string,
//! the matching verifier, and the clock abstraction the signer reads
//! `authTime` from.

pub mod clock;
pub mod signing;
pub mod verify;

pub use clock::*;
pub use signing::*;
pub use verify::*;
