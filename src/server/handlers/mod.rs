//! HTTP handlers for the server.

pub mod health;
pub mod preview;
pub mod print;
