//! Auto-Role Dashboard Test Utils
//!
//! Provides shared testing utilities for the dashboard's server-side tests. This crate offers
//! a builder for creating test contexts with in-memory SQLite databases, a session backed by
//! the same database, and factories for seeding guild settings documents.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn loads_settings() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_settings_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
