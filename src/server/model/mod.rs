//! Server-side domain models.
//!
//! Domain models are converted from Discord payloads and stored documents at the service
//! and repository boundaries and transformed to DTOs at the controller boundary.

pub mod discord;
pub mod session;
pub mod settings;
