use dioxus::prelude::*;

use crate::client::{constant::SITE_NAME, model::auth::SessionHandle, router::Route};

#[cfg(feature = "web")]
use crate::client::api::get_session;

const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[component]
pub fn App() -> Element {
    let mut session = use_context_provider(SessionHandle::new);

    // Read the session on first load; the server creates the store identity as needed
    #[cfg(feature = "web")]
    use_future(move || async move {
        let result = get_session().await;
        if let Err(err) = &result {
            dioxus_logger::tracing::error!("Failed to read session: {}", err);
        }
        session.login(result);
    });

    rsx! {
        Title { "{SITE_NAME}" }
        document::Meta {
            name: "description",
            content: "Configure auto-roles and welcome messages for your Discord servers"
        }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        Router::<Route> {}
    }
}
