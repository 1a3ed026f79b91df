mod auth_test;
mod helpers;
mod team_test;
