#[cfg(feature = "web")]
pub mod helper;

#[cfg(feature = "web")]
pub mod auth;

#[cfg(feature = "web")]
pub mod guild;

#[cfg(feature = "web")]
pub mod settings;

#[cfg(feature = "web")]
pub use auth::get_session;

#[cfg(feature = "web")]
pub use guild::get_guilds;

#[cfg(feature = "web")]
pub use settings::{get_settings, update_settings};
