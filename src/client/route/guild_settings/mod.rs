mod roles;
mod welcome;

use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::client::{
    component::{
        page::{ErrorPage, LoadingPage},
        ConfirmationModal, ErrorAlert, GuildIcon, NoticeAlert, Page,
    },
    constant::SITE_NAME,
    model::{
        auth::SessionHandle,
        settings::{Phase, SettingsEditor},
    },
    router::Route,
};

use roles::RolePicker;
use welcome::WelcomeSettings;

#[cfg(feature = "web")]
use crate::client::api::{get_settings, update_settings};

#[component]
pub fn GuildSettings(guild_id: u64) -> Element {
    let mut session = use_context::<SessionHandle>();
    let mut editor = use_signal(SettingsEditor::new);
    let mut show_discard = use_signal(|| false);
    let mut show_saved = use_signal(|| false);

    #[cfg(feature = "web")]
    {
        let future = use_resource(use_reactive!(|guild_id| async move {
            editor.set(SettingsEditor::new());
            get_settings(guild_id).await
        }));

        use_effect(move || {
            if let Some(result) = &*future.read() {
                if let Err(err) = result {
                    tracing::error!("Failed to load settings for guild {}: {}", guild_id, err);
                    if err.is_unauthorized() {
                        session.logout();
                    }
                }
                editor.write().loaded(result.clone());
            }
        });
    }

    let save = move |_: MouseEvent| {
        let Some(payload) = editor.write().begin_save() else {
            return;
        };

        #[cfg(feature = "web")]
        spawn(async move {
            let result = update_settings(guild_id, &payload).await;
            let succeeded = result.is_ok();
            if let Err(err) = &result {
                tracing::error!("Failed to save settings for guild {}: {}", guild_id, err);
                if err.is_unauthorized() {
                    session.logout();
                }
            }
            editor.write().saved(result);

            if succeeded {
                show_saved.set(true);
                gloo_timers::future::TimeoutFuture::new(3_000).await;
                show_saved.set(false);
            }
        });

        #[cfg(not(feature = "web"))]
        let _ = payload;
    };

    let state = editor();
    let busy = state.is_busy();

    if state.phase == Phase::Loading {
        return rsx! { LoadingPage {} };
    }

    let Some(view) = state.view.clone() else {
        // Loading failed and the error was dismissed; nothing to edit.
        return rsx! {
            Title { "Settings | {SITE_NAME}" }
            if let Some(message) = state.error() {
                ErrorPage { status: 502, message: message.to_string() }
            } else {
                ErrorPage { status: 404, message: "Settings could not be loaded." }
            }
        };
    };

    let member_count = view.guild.approximate_member_count.unwrap_or_default();
    let saving = state.phase == Phase::Saving;
    let has_changes = state.has_changes();
    let last_saved = view
        .settings
        .last_updated
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M UTC").to_string());

    rsx! {
        Title { "{view.guild.name} | {SITE_NAME}" }
        Page {
            class: "flex flex-col items-center w-full h-full",
            div {
                class: "w-full max-w-4xl flex flex-col gap-6 pb-24",
                div {
                    class: "flex flex-wrap items-center justify-between gap-4",
                    div {
                        class: "flex items-center gap-3",
                        GuildIcon {
                            name: view.guild.name.clone(),
                            icon_url: view.guild.icon_url(),
                            class: "w-12 h-12",
                        }
                        div {
                            h1 {
                                class: "text-2xl font-bold",
                                "{view.guild.name}"
                            }
                            if member_count > 0 {
                                p {
                                    class: "text-sm opacity-60",
                                    "{member_count} members"
                                }
                            }
                        }
                    }
                    div {
                        class: "flex gap-2",
                        Link {
                            to: Route::Home { guild_id: String::new() },
                            class: "btn btn-ghost",
                            "Back"
                        }
                        if !view.invite_url.is_empty() {
                            a {
                                href: "{view.invite_url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "btn btn-outline",
                                "Invite Bot"
                            }
                        }
                    }
                }

                if let Some(message) = state.error() {
                    ErrorAlert {
                        message: message.to_string(),
                        on_dismiss: move |_| editor.write().dismiss(),
                    }
                }
                if let Some(notice) = state.notice.clone() {
                    NoticeAlert {
                        message: notice,
                        on_dismiss: move |_| editor.write().dismiss(),
                    }
                }

                RolePicker {
                    roles: view.roles.clone(),
                    selected: state.draft.roles.clone(),
                    disabled: busy,
                    on_toggle: move |role_id| editor.write().toggle_role(role_id),
                }

                WelcomeSettings {
                    channels: view.channels.clone(),
                    channel_id: state.draft.welcome_channel_id,
                    message: state.draft.welcome_message.clone(),
                    guild_name: view.guild.name.clone(),
                    member_count,
                    disabled: busy,
                    on_channel: move |channel_id| editor.write().set_welcome_channel(channel_id),
                    on_message: move |message| editor.write().set_welcome_message(message),
                }

                if let Some(last_saved) = last_saved {
                    p {
                        class: "text-sm opacity-60",
                        "Last saved {last_saved}"
                    }
                }
            }

            div {
                class: "fixed bottom-0 left-0 w-full bg-base-200 border-t border-base-300 p-4 flex justify-end gap-2",
                if show_saved() {
                    span {
                        class: "self-center text-success mr-auto",
                        "Settings saved"
                    }
                }
                button {
                    r#type: "button",
                    class: "btn",
                    disabled: !has_changes || busy,
                    onclick: move |_| show_discard.set(true),
                    "Discard"
                }
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    disabled: state.phase != Phase::Editing,
                    onclick: save,
                    if saving {
                        span { class: "loading loading-spinner loading-sm mr-2" }
                        "Saving..."
                    } else {
                        "Save Changes"
                    }
                }
            }
        }
        ConfirmationModal {
            show: show_discard,
            title: "Discard changes?",
            message: "Your unsaved role and welcome message changes will be lost.",
            confirm_text: "Discard",
            confirm_class: "btn-error",
            on_confirm: move |_| editor.write().discard(),
        }
    }
}
