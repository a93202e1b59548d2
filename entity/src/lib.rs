//! SeaORM entities for the dashboard's local document store.

pub mod prelude;

pub mod guild_settings;
