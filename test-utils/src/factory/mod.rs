//! Factory methods for creating test data.
//!
//! Each factory offers a builder struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let doc = factory::guild_settings::GuildSettingsFactory::new(&db)
//!     .guild_id("123456789")
//!     .auto_role_ids(["1", "2"])
//!     .extra_field("premium", serde_json::json!(true))
//!     .build()
//!     .await?;
//! ```

pub mod guild_settings;
pub mod helpers;

pub use guild_settings::create_guild_settings;
