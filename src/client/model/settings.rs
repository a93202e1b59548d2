//! State of the guild settings view.
//!
//! ```text
//! loading -> ready -> (editing <-> saving) -> ready
//! loading -> error -> ready
//! saving  -> error -> editing
//! ```

use crate::{
    client::model::error::ApiError,
    model::settings::{
        GuildSettingsDto, RoleSelection, SettingsViewDto, UpdateGuildSettingsDto,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Loading,
    Ready,
    /// Draft differs from what was loaded or last saved.
    Editing,
    Saving,
    /// `resume` is the phase restored when the error is dismissed.
    Error { message: String, resume: Box<Phase> },
}

/// Editable fields of the settings view.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SettingsDraft {
    pub roles: RoleSelection,
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
}

impl SettingsDraft {
    pub fn from_settings(settings: &GuildSettingsDto) -> Self {
        Self {
            roles: RoleSelection::from_ids(settings.auto_role_ids.clone()),
            welcome_channel_id: settings.welcome_channel_id,
            welcome_message: settings.welcome_message.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateGuildSettingsDto {
        UpdateGuildSettingsDto {
            auto_role_ids: self.roles.ids().to_vec(),
            welcome_channel_id: self.welcome_channel_id,
            welcome_message: self.welcome_message.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SettingsEditor {
    pub phase: Phase,
    pub view: Option<SettingsViewDto>,
    pub draft: SettingsDraft,
    /// Validation message from the role picker, shown until dismissed or the next change.
    pub notice: Option<String>,
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsEditor {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            view: None,
            draft: SettingsDraft::default(),
            notice: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Saving)
    }

    pub fn has_changes(&self) -> bool {
        matches!(self.phase, Phase::Editing)
            || matches!(&self.phase, Phase::Error { resume, .. } if **resume == Phase::Editing)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn loaded(&mut self, result: Result<SettingsViewDto, ApiError>) {
        match result {
            Ok(view) => {
                self.draft = SettingsDraft::from_settings(&view.settings);
                self.view = Some(view);
                self.notice = None;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.phase = Phase::Error {
                    message: err.message,
                    resume: Box::new(Phase::Ready),
                };
            }
        }
    }

    /// Toggles a role; a sixth role is refused with a notice and the selection kept.
    pub fn toggle_role(&mut self, role_id: u64) {
        if !self.can_edit() {
            return;
        }

        match self.draft.roles.toggle(role_id) {
            Ok(_) => {
                self.notice = None;
                self.phase = Phase::Editing;
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    pub fn set_welcome_channel(&mut self, channel_id: Option<u64>) {
        if self.can_edit() {
            self.draft.welcome_channel_id = channel_id;
            self.phase = Phase::Editing;
        }
    }

    pub fn set_welcome_message(&mut self, message: String) {
        if self.can_edit() {
            self.draft.welcome_message = message;
            self.phase = Phase::Editing;
        }
    }

    /// Moves to `saving` and returns the payload to send, if there is anything to save.
    pub fn begin_save(&mut self) -> Option<UpdateGuildSettingsDto> {
        if self.phase != Phase::Editing {
            return None;
        }

        self.phase = Phase::Saving;
        Some(self.draft.to_update())
    }

    pub fn saved(&mut self, result: Result<GuildSettingsDto, ApiError>) {
        match result {
            Ok(settings) => {
                self.draft = SettingsDraft::from_settings(&settings);
                if let Some(view) = self.view.as_mut() {
                    view.settings = settings;
                }
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.phase = Phase::Error {
                    message: err.message,
                    resume: Box::new(Phase::Editing),
                };
            }
        }
    }

    /// Drops unsaved edits, including those kept after a failed save.
    pub fn discard(&mut self) {
        if !self.has_changes() {
            return;
        }
        if let Some(view) = &self.view {
            self.draft = SettingsDraft::from_settings(&view.settings);
        }
        self.notice = None;
        self.phase = Phase::Ready;
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
        if let Phase::Error { resume, .. } = &self.phase {
            self.phase = (**resume).clone();
        }
    }

    fn can_edit(&self) -> bool {
        self.view.is_some() && matches!(self.phase, Phase::Ready | Phase::Editing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::{GuildSummaryDto, DEFAULT_WELCOME_MESSAGE};

    fn view(settings: GuildSettingsDto) -> SettingsViewDto {
        SettingsViewDto {
            guild: GuildSummaryDto {
                id: 1,
                name: "Crab Shack".to_string(),
                icon: None,
                approximate_member_count: Some(10),
            },
            roles: Vec::new(),
            channels: Vec::new(),
            settings,
            invite_url: String::new(),
        }
    }

    fn api_error(message: &str) -> ApiError {
        ApiError {
            status: 500,
            message: message.to_string(),
        }
    }

    fn ready() -> SettingsEditor {
        let mut editor = SettingsEditor::new();
        editor.loaded(Ok(view(GuildSettingsDto::default())));
        editor
    }

    #[test]
    fn load_moves_to_ready_with_defaults() {
        let editor = ready();

        assert_eq!(editor.phase, Phase::Ready);
        assert!(editor.draft.roles.is_empty());
        assert_eq!(editor.draft.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[test]
    fn failed_load_dismisses_to_ready() {
        let mut editor = SettingsEditor::new();
        editor.loaded(Err(api_error("Discord unavailable")));

        assert_eq!(editor.error(), Some("Discord unavailable"));

        editor.dismiss();
        assert_eq!(editor.phase, Phase::Ready);
        assert!(editor.view.is_none());
    }

    #[test]
    fn edits_move_to_editing_and_save_returns_payload() {
        let mut editor = ready();

        editor.toggle_role(11);
        editor.toggle_role(22);
        editor.set_welcome_channel(Some(33));
        editor.set_welcome_message("Hi {user}".to_string());

        assert_eq!(editor.phase, Phase::Editing);

        let payload = editor.begin_save().unwrap();
        assert_eq!(editor.phase, Phase::Saving);
        assert_eq!(payload.auto_role_ids, vec![11, 22]);
        assert_eq!(payload.welcome_channel_id, Some(33));
        assert_eq!(payload.welcome_message, "Hi {user}");
    }

    #[test]
    fn sixth_role_sets_notice_without_changing_selection() {
        let mut editor = ready();
        for id in 1..=5 {
            editor.toggle_role(id);
        }

        editor.toggle_role(6);

        assert!(editor.notice.is_some());
        assert_eq!(editor.draft.roles.ids(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn refused_role_stays_unchecked_until_a_slot_frees() {
        let mut editor = ready();
        for id in 1..=5 {
            editor.toggle_role(id);
        }

        editor.toggle_role(6);
        assert!(!editor.draft.roles.contains(6));

        editor.toggle_role(2);
        editor.toggle_role(6);

        assert!(editor.notice.is_none());
        assert!(editor.draft.roles.contains(6));
        assert_eq!(editor.draft.roles.ids(), &[1, 3, 4, 5, 6]);
    }

    #[test]
    fn successful_save_returns_to_ready() {
        let mut editor = ready();
        editor.toggle_role(7);
        let payload = editor.begin_save().unwrap();

        editor.saved(Ok(GuildSettingsDto {
            auto_role_ids: payload.auto_role_ids,
            ..GuildSettingsDto::default()
        }));

        assert_eq!(editor.phase, Phase::Ready);
        assert_eq!(editor.view.as_ref().unwrap().settings.auto_role_ids, vec![7]);
    }

    #[test]
    fn failed_save_dismisses_back_to_editing_with_draft() {
        let mut editor = ready();
        editor.toggle_role(7);
        editor.begin_save();

        editor.saved(Err(api_error("Failed to access saved settings")));
        assert!(editor.has_changes());

        editor.dismiss();
        assert_eq!(editor.phase, Phase::Editing);
        assert_eq!(editor.draft.roles.ids(), &[7]);
    }

    #[test]
    fn nothing_to_save_when_unchanged() {
        let mut editor = ready();

        assert!(editor.begin_save().is_none());
        assert_eq!(editor.phase, Phase::Ready);
    }

    #[test]
    fn edits_ignored_while_saving() {
        let mut editor = ready();
        editor.toggle_role(7);
        editor.begin_save();

        editor.toggle_role(8);

        assert_eq!(editor.draft.roles.ids(), &[7]);
        assert_eq!(editor.phase, Phase::Saving);
    }

    #[test]
    fn discard_after_failed_save_restores_loaded_settings() {
        let mut editor = ready();
        editor.toggle_role(7);
        editor.begin_save();
        editor.saved(Err(api_error("Failed to access saved settings")));

        editor.discard();

        assert_eq!(editor.phase, Phase::Ready);
        assert!(editor.draft.roles.is_empty());
    }

    #[test]
    fn discard_restores_loaded_settings() {
        let mut editor = ready();
        editor.toggle_role(7);

        editor.discard();

        assert_eq!(editor.phase, Phase::Ready);
        assert!(editor.draft.roles.is_empty());
    }
}
