//! # hkadm Common Library
//!
//! Shared code for the hackathon administration console:
//! - Gateway wire models (hackathons, inscriptions, teams, announcements, results)
//! - Event types (AdminEvent enum) and the EventBus
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use error::{Error, Result};
pub use events::{AdminEvent, EventBus};
