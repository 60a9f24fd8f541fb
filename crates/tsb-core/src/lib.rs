//! Core domain + gateway contracts for the teams Slack bot.
//!
//! This crate is transport-agnostic. The Users/Teams services are reached
//! through repository ports (traits); the networked implementation lives in
//! `tsb-rest`, the canned one in [`canned`].

pub mod canned;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exchange;
pub mod logging;
pub mod ports;
pub mod request;

pub use errors::{Error, Result};
