//! Mushroom Scout CLI
//!
//! 野生菌識別APIのネイティブクライアント

pub mod browse;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;
