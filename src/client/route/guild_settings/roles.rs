use dioxus::prelude::*;

use crate::model::settings::{RoleDto, RoleSelection, MAX_AUTO_ROLES};

/// Role list with checkboxes, highest role first.
#[component]
pub fn RolePicker(
    roles: Vec<RoleDto>,
    selected: RoleSelection,
    disabled: bool,
    on_toggle: EventHandler<u64>,
) -> Element {
    let count = selected.len();

    rsx!(
        div {
            class: "card bg-base-200",
            div {
                class: "card-body gap-4",
                div {
                    class: "flex items-center justify-between",
                    h2 {
                        class: "card-title",
                        "Auto-Roles"
                    }
                    span {
                        class: if selected.is_full() { "badge badge-warning" } else { "badge" },
                        "{count} / {MAX_AUTO_ROLES}"
                    }
                }
                p {
                    class: "text-sm opacity-70",
                    "New members receive these roles when they join. The bot's own role must be above them."
                }
                if roles.is_empty() {
                    p {
                        class: "opacity-50 italic",
                        "This server has no roles besides @everyone."
                    }
                } else {
                    ul {
                        class: "flex flex-col gap-1 max-h-96 overflow-y-auto",
                        for role in roles {
                            RoleRow {
                                key: "{role.id}",
                                checked: selected.contains(role.id),
                                role: role.clone(),
                                disabled,
                                on_toggle,
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn RoleRow(role: RoleDto, checked: bool, disabled: bool, on_toggle: EventHandler<u64>) -> Element {
    let role_id = role.id;

    rsx!(
        li {
            label {
                class: "flex items-center gap-3 p-2 rounded hover:bg-base-300 cursor-pointer",
                input {
                    r#type: "checkbox",
                    class: "checkbox checkbox-sm",
                    checked,
                    disabled,
                    // The box only reflects `checked`; a refused toggle must not flip it.
                    onclick: move |evt| {
                        evt.prevent_default();
                        on_toggle.call(role_id);
                    },
                }
                span {
                    class: "w-3 h-3 rounded-full",
                    style: "background-color: {role.color}",
                }
                span { "{role.name}" }
            }
        }
    )
}
