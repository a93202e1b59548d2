use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_brands_icons::FaDiscord, Icon};

use crate::client::{
    constant::SITE_NAME,
    model::auth::{login_href, SessionHandle, LOGOUT_HREF},
    router::Route,
};

#[component]
pub fn Header() -> Element {
    let mut session = use_context::<SessionHandle>();
    let route = use_route::<Route>();

    let fetch_completed = !session.read().is_initializing();
    let user = session.user();
    let store_session = session
        .backing_store_user_id()
        .map(|uid| format!("Settings store session {}", uid))
        .unwrap_or_default();

    rsx!(div {
        class: "fixed flex justify-between gap-4 w-full h-20 py-2 px-4 bg-base-200 z-20",
        div {
            class: "flex items-center",
            Link {
                to: Route::Home { guild_id: String::new() },
                div {
                    class: "flex items-center gap-3",
                    Icon {
                        width: 32,
                        height: 32,
                        icon: FaDiscord
                    }
                    p {
                        class: "md:text-xl text-wrap",
                        {SITE_NAME}
                    }
                }
            }
        }
        div {
            class: "flex items-center gap-3",
            if let Some(user) = user {
                img {
                    src: user.avatar_url(),
                    alt: "{user.username} avatar",
                    class: "w-9 h-9 rounded-full",
                }
                p {
                    class: "hidden sm:block",
                    title: "{store_session}",
                    "{user.tag()}"
                }
                a {
                    href: LOGOUT_HREF,
                    onclick: move |_| session.logout(),
                    div {
                        class: "btn btn-outline",
                        p { "Logout" }
                    }
                }
            } else if fetch_completed {
                a {
                    href: login_href(route.requested_guild()),
                    div {
                        class: "btn btn-outline flex gap-2 items-center",
                        Icon {
                            width: 22,
                            height: 22,
                            icon: FaDiscord
                        }
                        p { "Login" }
                    }
                }
            }
        }
    })
}
