use crate::{
    model::{guild::GuildDto, user::DiscordUserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::{AuthGuard, Permission},
            session::{AuthSession, CsrfSession, OAuthFlowSession, StoreSession},
        },
        model::session::{LoginOutcome, StoreIdentity},
    },
};
use test_utils::context::TestContext;

mod auth_guard;

fn login(guild_ids: &[u64]) -> LoginOutcome {
    LoginOutcome {
        user: DiscordUserDto {
            id: 1001,
            username: "ferris".to_string(),
            discriminator: Some("0".to_string()),
            avatar: None,
        },
        access_token: "access-token".to_string(),
        guilds: guild_ids
            .iter()
            .map(|id| GuildDto {
                id: *id,
                name: format!("Guild {}", id),
                icon: None,
                permissions: 0x8,
            })
            .collect(),
    }
}
