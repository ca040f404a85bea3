//! hotspot-core - Selection-driven metadata panel for detection records
//!
//! Loads configuration, talks to the detection server's status endpoint and
//! keeps the panel's snapshot and pending edit consistent with both the
//! operator's input and the server's answers.

pub mod config;
pub mod edit;
pub mod panel;
pub mod status_client;

#[cfg(test)]
mod testing;

pub use hotspot_common::*;
