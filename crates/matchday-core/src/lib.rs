//! Shared service plumbing: tracing setup, request-id middleware, health
//! handlers, response envelope, serde helpers.

pub mod health;
pub mod middleware;
pub mod response;
pub mod serde;
pub mod tracing;
