use dioxus::prelude::*;

use crate::{
    client::{component::WelcomePreview, constant::PREVIEW_USER},
    model::settings::ChannelDto,
};

#[component]
pub fn WelcomeSettings(
    channels: Vec<ChannelDto>,
    channel_id: Option<u64>,
    message: String,
    guild_name: String,
    member_count: u64,
    disabled: bool,
    on_channel: EventHandler<Option<u64>>,
    on_message: EventHandler<String>,
) -> Element {
    let channel_name = channel_id.and_then(|id| {
        channels
            .iter()
            .find(|channel| channel.id == id)
            .map(|channel| channel.name.clone())
    });
    let selected_value = channel_id.map(|id| id.to_string()).unwrap_or_default();

    rsx!(
        div {
            class: "card bg-base-200",
            div {
                class: "card-body gap-4",
                h2 {
                    class: "card-title",
                    "Welcome Message"
                }
                label {
                    class: "form-control w-full",
                    span { class: "label-text mb-1", "Channel" }
                    select {
                        class: "select select-bordered w-full",
                        disabled,
                        value: "{selected_value}",
                        onchange: move |evt| on_channel.call(evt.value().parse::<u64>().ok()),
                        option { value: "", "No welcome message" }
                        for channel in channels {
                            option {
                                key: "{channel.id}",
                                value: "{channel.id}",
                                selected: channel_id == Some(channel.id),
                                "#{channel.name}"
                            }
                        }
                    }
                }
                label {
                    class: "form-control w-full",
                    span { class: "label-text mb-1", "Message" }
                    textarea {
                        class: "textarea textarea-bordered w-full h-28",
                        disabled,
                        value: "{message}",
                        oninput: move |evt| on_message.call(evt.value()),
                    }
                    span {
                        class: "label-text-alt mt-1 opacity-60",
                        "Placeholders: {{user}}, {{guild}}, {{member_count}}. Markdown is supported."
                    }
                }
                WelcomePreview {
                    template: message.clone(),
                    user: PREVIEW_USER.to_string(),
                    guild: guild_name,
                    member_count,
                    channel: channel_name,
                }
            }
        }
    )
}
