use crate::server::{
    data::settings::GuildSettingsRepository,
    error::store::StoreError,
    model::settings::{GuildSettings, SettingsUpdate},
};
use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod find;
mod merge;

fn update(role_ids: Vec<u64>) -> SettingsUpdate {
    SettingsUpdate {
        auto_role_ids: role_ids,
        welcome_channel_id: Some(555),
        welcome_message: "Hey {user}, welcome to {guild}".to_string(),
        last_updated: Utc::now(),
        updated_by_discord_id: 80351110224678912,
        updated_by_store_uid: None,
    }
}
