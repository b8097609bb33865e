//! Request handlers
//!
//! Handlers unpack the request, hand the caller's `Session` to the gateway
//! and map its result to a response. No rule is decided here.

pub mod items;
pub mod claims;
pub mod health;
