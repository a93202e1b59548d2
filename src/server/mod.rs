//! Server-side API backend.
//!
//! Owns the Discord OAuth client secret and every access token, calls the Discord REST API
//! on behalf of the logged-in user, and reads and writes guild settings documents in the
//! configured backing store. Uses Axum as the web framework, SeaORM over SQLite for local
//! persistence and `tower-sessions` for per-browser state.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Discord API calls, login flow, identity bootstrap, settings load/save
//! - **Data Layer** (`data/`) - Settings documents in SQLite or Firestore
//! - **Model Layer** (`model/`) - Discord payloads, settings documents, session values
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session access and authentication guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (HTTP client, OAuth client, document store)
//! - **Startup** (`startup`) - Initialization of database, sessions, and clients
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** loads the session and checks guild access
//! 3. **Controller** calls the service with the caller's token and identity
//! 4. **Service** talks to Discord and the document store
//! 5. **Controller** returns the resulting DTO as JSON
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
