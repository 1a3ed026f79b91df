//! sea-orm entities for the Matchday API database.

pub mod fixtures;
pub mod teams;
pub mod users;
