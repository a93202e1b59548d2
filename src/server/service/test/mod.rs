use serde_json::json;
use std::collections::HashMap;
use wiremock::{
    matchers::{body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::config::Config;

mod auth;

/// Configuration whose Discord endpoints all point at the mock server.
fn config(server: &MockServer) -> Config {
    let env = HashMap::from([
        ("DATABASE_URL", "sqlite::memory:"),
        ("DISCORD_CLIENT_ID", "1234"),
        ("DISCORD_CLIENT_SECRET", "secret"),
        ("DISCORD_REDIRECT_URL", "http://localhost:8080/api/auth/callback"),
        ("APP_ID", "autorole"),
    ]);
    let mut config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
    config.discord_token_url = format!("{}/oauth2/token", server.uri());
    config.discord_api_url = server.uri();
    config
}

fn user_body() -> serde_json::Value {
    json!({
        "id": "80351110224678912",
        "username": "ferris",
        "discriminator": "0",
        "avatar": null
    })
}
