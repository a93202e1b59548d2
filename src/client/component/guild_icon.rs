use dioxus::prelude::*;

/// Server icon, or its first letter when the server has none.
#[component]
pub fn GuildIcon(name: String, icon_url: Option<String>, class: Option<&'static str>) -> Element {
    let class: &str = class.unwrap_or("w-12 h-12");
    let initial = name.chars().next().unwrap_or('?');

    rsx!(
        if let Some(src) = icon_url {
            img {
                src,
                alt: "{name} icon",
                class: "{class} rounded-full",
            }
        } else {
            div {
                class: "{class} rounded-full bg-neutral flex items-center justify-center font-bold",
                "{initial}"
            }
        }
    )
}
