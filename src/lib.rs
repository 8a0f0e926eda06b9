//! Waymark - location record service
//!
//! Ingests timestamped positions for named clients into an append-only
//! log and serves them back filtered, ordered, and paginated.

pub mod config;
pub mod handlers;
pub mod records;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
