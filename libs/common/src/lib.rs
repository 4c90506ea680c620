//! Common library for the Carve services
//!
//! This crate provides the types shared between the auth service and the
//! API service: the identity and session models, the per-request context,
//! and the wire contract for the session-validation endpoint.

pub mod contract;
pub mod models;
