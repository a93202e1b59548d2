use dioxus::prelude::*;

use crate::client::{
    component::page::{ErrorPage, LoadingPage},
    model::auth::{AuthState, SessionHandle},
    router::Route,
};

/// Renders the nested route once a Discord login is present, otherwise sends the
/// visitor to the login page.
#[component]
pub fn RequiresLoggedIn() -> Element {
    let session = use_context::<SessionHandle>();
    let nav = navigator();
    let route = use_route::<Route>();

    let fetch_completed = !session.read().is_initializing();
    let user_logged_in = session.is_authenticated();

    use_effect(use_reactive!(|(user_logged_in, fetch_completed, route)| {
        if fetch_completed && !user_logged_in {
            nav.push(route.login_redirect());
        }
    }));

    let state = session.read().clone();

    rsx! {
        match state {
            AuthState::Initializing => rsx! { LoadingPage {} },
            AuthState::Authenticated(_) => rsx! { Outlet::<Route> {} },
            AuthState::Error(err) => rsx! {
                ErrorPage { status: err.status, message: err.message }
            },
            // Redirecting via the effect above
            AuthState::NotLoggedIn(_) => rsx! {},
        }
    }
}
