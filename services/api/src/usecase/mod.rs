pub mod auth;
pub mod fixture;
pub mod team;
