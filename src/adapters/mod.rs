//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP transport, grade export files, terminal UI.

pub mod export;
pub mod http;
pub mod ui;
