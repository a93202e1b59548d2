use dioxus::prelude::*;
use pulldown_cmark::{html, Event, Options, Parser, Tag};

use crate::model::settings::{render_welcome_message, WelcomeContext};

/// Renders a welcome message template the way Discord would show it.
///
/// Single newlines are kept as line breaks and raw HTML is shown as text. Links and images
/// pointing anywhere but `http(s)` lose their markup and keep only their text.
pub fn preview_html(template: &str, context: &WelcomeContext<'_>) -> String {
    let message = render_welcome_message(template, context);

    let parser = Parser::new_ext(&message, Options::ENABLE_STRIKETHROUGH).filter_map(|event| {
        match event {
            Event::SoftBreak => Some(Event::HardBreak),
            Event::Html(raw) => Some(Event::Text(raw)),
            Event::Start(Tag::Link(_, dest, _))
            | Event::End(Tag::Link(_, dest, _))
            | Event::Start(Tag::Image(_, dest, _))
            | Event::End(Tag::Image(_, dest, _))
                if !is_web_url(&dest) =>
            {
                None
            }
            other => Some(other),
        }
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn is_web_url(dest: &str) -> bool {
    let dest = dest.trim_start().to_ascii_lowercase();
    dest.starts_with("https://") || dest.starts_with("http://")
}

#[component]
pub fn WelcomePreview(
    template: String,
    user: String,
    guild: String,
    member_count: u64,
    channel: Option<String>,
) -> Element {
    let context = WelcomeContext {
        user: &user,
        guild: &guild,
        member_count,
    };
    let html_output = preview_html(&template, &context);

    rsx!(
        div {
            class: "rounded-lg bg-base-300 p-4 flex flex-col gap-2",
            p {
                class: "text-sm opacity-60",
                if let Some(channel) = channel {
                    "Preview in #{channel}"
                } else {
                    "Preview (no channel selected, message will not be sent)"
                }
            }
            div {
                class: "prose max-w-none",
                dangerous_inner_html: "{html_output}"
            }
        }
    )
}
