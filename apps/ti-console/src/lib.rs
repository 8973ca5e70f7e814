//! Console client for the TI inventory platform.
//!
//! Talks only to the API gateway and renders its answers as tables.

pub mod client;
pub mod config;
pub mod render;

pub use client::{ClientError, Download, GatewayClient};
pub use config::ConsoleConfig;
