//! REST API呼び出し

pub mod abort;
pub mod client;
