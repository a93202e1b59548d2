//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the external systems the dashboard talks to:
//! the Discord REST API, the backing-store identity provider and the document store.
//!
//! - **auth**: Discord OAuth2 login URL and callback
//! - **discord**: Bearer-authenticated Discord REST client plus pure guild/role/channel shaping
//! - **identity**: Backing-store identity bootstrap
//! - **invite**: Bot invite links
//! - **settings**: Settings view load and merge-write save

pub mod auth;
pub mod discord;
pub mod identity;
pub mod invite;
pub mod settings;

#[cfg(test)]
mod test;
