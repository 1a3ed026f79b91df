//! Bearer token and session cookie primitives for the Matchday API.

pub mod cookie;
pub mod token;
