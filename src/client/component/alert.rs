use dioxus::prelude::*;

/// Dismissible error banner.
#[component]
pub fn ErrorAlert(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx!(
        div {
            role: "alert",
            class: "alert alert-error flex justify-between",
            span { "{message}" }
            button {
                class: "btn btn-sm btn-ghost",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    )
}

#[component]
pub fn NoticeAlert(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx!(
        div {
            role: "status",
            class: "alert alert-warning flex justify-between",
            span { "{message}" }
            button {
                class: "btn btn-sm btn-ghost",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    )
}
