use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_brands_icons::FaDiscord, Icon};

use crate::client::{
    component::{page::LoadingPage, ErrorAlert, Page},
    constant::SITE_NAME,
    model::auth::{login_href, AuthState, SessionHandle},
    router::Route,
};

#[component]
pub fn Login(guild_id: String) -> Element {
    let mut session = use_context::<SessionHandle>();
    let nav = navigator();
    let href = login_href(guild_id.parse().ok());

    // Handle redirect for authenticated users
    use_effect(use_reactive!(|guild_id| {
        if session.is_authenticated() {
            nav.push(Route::Home {
                guild_id: guild_id.clone(),
            });
        }
    }));

    let state = session.read().clone();
    let auth_error = session.auth_error();

    rsx! {
        Title { "Login | {SITE_NAME}" }
        match state {
            AuthState::Initializing | AuthState::Authenticated(_) => rsx! {
                LoadingPage {}
            },
            AuthState::NotLoggedIn(_) | AuthState::Error(_) => rsx! {
                Page {
                    class: "flex flex-col gap-6 items-center justify-center w-full h-full",
                    if let Some(message) = auth_error {
                        div {
                            class: "w-full max-w-md",
                            ErrorAlert {
                                message,
                                on_dismiss: move |_| session.dismiss_error(),
                            }
                        }
                    }
                    div {
                        class: "flex flex-col items-center gap-4",
                        Icon {
                            width: 96,
                            height: 96,
                            icon: FaDiscord
                        }
                        p {
                            class: "text-2xl",
                            {SITE_NAME}
                        }
                        p {
                            class: "opacity-70 text-center max-w-md",
                            "Log in with Discord to manage auto-roles and welcome messages for the servers you administer."
                        }
                    }
                    div {
                        a {
                            href: "{href}",
                            div {
                                class: "btn btn-outline flex gap-2 items-center",
                                Icon {
                                    width: 24,
                                    height: 24,
                                    icon: FaDiscord
                                }
                                p { "Login with Discord" }
                            }
                        }
                    }
                }
            }
        }
    }
}
