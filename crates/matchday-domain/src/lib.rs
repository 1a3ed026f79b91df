//! Domain types shared across the Matchday workspace.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod fixture;
pub mod pagination;
pub mod user;
