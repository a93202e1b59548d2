//! HTTP request handlers for the dashboard API.
//!
//! Controllers check access through `AuthGuard`, call the matching service and convert
//! the result into a JSON response or redirect. Each handler carries a `utoipa::path`
//! annotation so it appears in the generated API document.

pub mod auth;
pub mod guild;
pub mod settings;

#[cfg(test)]
mod test;
