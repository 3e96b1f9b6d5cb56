//! Shared trust store provisioning domain primitives.
//!
//! This crate owns the custom resource event contract, lifecycle request and
//! result types, deadline arithmetic, the authorization policy and the
//! token scope mapping. It intentionally excludes AWS SDK and Lambda runtime
//! concerns.

pub mod artifact;
pub mod authorization;
pub mod contract;
pub mod deadline;
pub mod token_scopes;
