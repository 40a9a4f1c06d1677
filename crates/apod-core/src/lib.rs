//! Core domain + application logic for the APOD → Slack publisher.
//!
//! This crate is intentionally transport-agnostic. The NASA fetcher and the Slack
//! publisher live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod message;
pub mod pipeline;
pub mod ports;

pub use errors::{Error, Result};
