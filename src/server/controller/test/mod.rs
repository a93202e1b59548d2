use crate::{
    model::{guild::GuildDto, user::DiscordUserDto},
    server::{
        controller::auth::finish_login,
        error::{auth::AuthError, discord::DiscordApiError, AppError},
        middleware::session::{AuthSession, OAuthFlowSession, StoreSession},
        model::session::{LoginOutcome, StoreIdentity},
    },
};
use test_utils::context::TestContext;


fn outcome() -> LoginOutcome {
    LoginOutcome {
        user: DiscordUserDto {
            id: 80351110224678912,
            username: "ferris".to_string(),
            discriminator: None,
            avatar: None,
        },
        access_token: "access-token".to_string(),
        guilds: vec![GuildDto {
            id: 42,
            name: "Crab Shack".to_string(),
            icon: None,
            permissions: 0x8,
        }],
    }
}
