//! Shared helpers for logging and progress output

pub mod logging;
