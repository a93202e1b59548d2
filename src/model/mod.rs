//! Data transfer objects shared by the client and the server.

pub mod api;
pub mod guild;
pub mod settings;
pub mod snowflake;
pub mod user;
