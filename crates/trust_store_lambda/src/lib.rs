//! AWS-oriented adapters and handlers for the trust store custom resource.
//!
//! This crate owns runtime integration details (Lambda handlers, the S3
//! artifact store, the orchestrator callback client, configuration and
//! logging) on top of the domain primitives in `trust_store_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
