use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        component::{
            page::{ErrorPage, LoadingPage},
            ErrorAlert, GuildIcon, Page,
        },
        constant::SITE_NAME,
        model::{auth::SessionHandle, error::ApiError},
        router::Route,
    },
    model::guild::{GuildDto, GuildListDto},
};

#[cfg(feature = "web")]
use crate::client::api::get_guilds;

/// Outcome of the `guild_id` query parameter on the server list.
#[derive(Debug, Clone, PartialEq)]
pub enum Preselect {
    None,
    Open(u64),
    /// The caller does not administer the requested server.
    Unavailable,
}

pub fn preselect(guild_id: &str, guilds: &[GuildDto]) -> Preselect {
    if guild_id.is_empty() {
        return Preselect::None;
    }

    match guild_id.parse::<u64>() {
        Ok(id) if guilds.iter().any(|guild| guild.id == id) => Preselect::Open(id),
        _ => Preselect::Unavailable,
    }
}

#[component]
pub fn Home(guild_id: String) -> Element {
    let mut session = use_context::<SessionHandle>();
    let nav = navigator();
    let mut guilds = use_signal(|| None::<Result<GuildListDto, ApiError>>);
    let mut unavailable = use_signal(|| false);

    #[cfg(feature = "web")]
    {
        let future = use_resource(|| async move { get_guilds().await });

        match &*future.read_unchecked() {
            Some(Ok(list)) => {
                if guilds.peek().is_none() {
                    guilds.set(Some(Ok(list.clone())));
                }
            }
            Some(Err(err)) => {
                if guilds.peek().is_none() {
                    tracing::error!("Failed to fetch guilds: {}", err);
                    guilds.set(Some(Err(err.clone())));
                }
            }
            None => (),
        }
    }

    use_effect(use_reactive!(|guild_id| {
        let Some(Ok(list)) = &*guilds.read() else {
            return;
        };
        match preselect(&guild_id, &list.guilds) {
            Preselect::Open(id) => {
                nav.replace(Route::GuildSettings { guild_id: id });
            }
            Preselect::Unavailable => unavailable.set(true),
            Preselect::None => (),
        }
    }));

    use_effect(move || {
        if let Some(Err(err)) = &*guilds.read() {
            if err.is_unauthorized() {
                session.logout();
            }
        }
    });

    rsx! {
        Title { "Servers | {SITE_NAME}" }
        match guilds() {
            None => rsx! { LoadingPage {} },
            Some(Err(err)) => rsx! {
                ErrorPage { status: err.status, message: err.message }
            },
            Some(Ok(list)) => rsx! {
                Page {
                    class: "flex flex-col items-center w-full h-full",
                    div {
                        class: "w-full max-w-6xl flex flex-col gap-6",
                        div {
                            class: "flex flex-wrap items-center justify-between gap-4",
                            h1 {
                                class: "text-2xl font-bold",
                                "Your Servers"
                            }
                            a {
                                href: "{list.invite_url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "btn btn-primary",
                                "Add Bot to a Server"
                            }
                        }
                        if unavailable() {
                            ErrorAlert {
                                message: "You don't administer that server, or the bot can't see it.",
                                on_dismiss: move |_| unavailable.set(false),
                            }
                        }
                        if list.guilds.is_empty() {
                            div {
                                class: "text-center py-12",
                                h2 {
                                    class: "text-xl mb-2",
                                    "No Servers Available"
                                }
                                p {
                                    class: "opacity-70",
                                    "You need the Administrator permission in a server to configure it here."
                                }
                            }
                        } else {
                            div {
                                class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4",
                                for guild in list.guilds {
                                    GuildCard { key: "{guild.id}", guild: guild.clone() }
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn GuildCard(guild: GuildDto) -> Element {
    rsx!(
        Link {
            to: Route::GuildSettings { guild_id: guild.id },
            class: "flex items-center gap-4 p-4 border border-neutral rounded-lg hover:bg-base-200 transition-colors",
            GuildIcon { name: guild.name.clone(), icon_url: guild.icon_url() }
            div {
                class: "flex-1 min-w-0",
                h3 {
                    class: "font-semibold truncate",
                    "{guild.name}"
                }
                p {
                    class: "text-sm opacity-60",
                    "Configure auto-roles"
                }
            }
        }
    )
}
