//! Guild auto-role and welcome settings shared by client and server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Maximum number of roles handed out automatically to new members.
pub const MAX_AUTO_ROLES: usize = 5;

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome {user} to {guild}! You are the {member_count}th member.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct RoleDto {
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    pub position: i32,
    /// Hex color such as `#FF5733`, `#99AAB5` for uncolored roles.
    pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ChannelDto {
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    pub position: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct GuildSummaryDto {
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    pub approximate_member_count: Option<u64>,
}

impl GuildSummaryDto {
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("https://cdn.discordapp.com/icons/{}/{}.png", self.id, hash))
    }
}

/// Persisted settings for one guild.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct GuildSettingsDto {
    #[serde(with = "crate::model::snowflake::vec_as_string")]
    #[cfg_attr(feature = "server", schema(value_type = Vec<String>))]
    pub auto_role_ids: Vec<u64>,
    #[serde(with = "crate::model::snowflake::option_as_string", default)]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(with = "crate::model::snowflake::option_as_string", default)]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub updated_by_discord_id: Option<u64>,
}

impl Default for GuildSettingsDto {
    /// Settings shown for a guild that has never been saved.
    fn default() -> Self {
        Self {
            auto_role_ids: Vec::new(),
            welcome_channel_id: None,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            last_updated: None,
            updated_by_discord_id: None,
        }
    }
}

/// The editable subset of [`GuildSettingsDto`] sent on save.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct UpdateGuildSettingsDto {
    #[serde(with = "crate::model::snowflake::vec_as_string")]
    #[cfg_attr(feature = "server", schema(value_type = Vec<String>))]
    pub auto_role_ids: Vec<u64>,
    #[serde(with = "crate::model::snowflake::option_as_string", default)]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
}

/// Everything the settings view needs, loaded in one request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct SettingsViewDto {
    pub guild: GuildSummaryDto,
    /// Sorted by descending position, without `@everyone`.
    pub roles: Vec<RoleDto>,
    /// Text channels only.
    pub channels: Vec<ChannelDto>,
    pub settings: GuildSettingsDto,
    /// Bot invite link with this guild preselected.
    #[serde(default)]
    pub invite_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelectionError {
    /// Adding another role would exceed [`MAX_AUTO_ROLES`].
    LimitReached,
}

impl std::fmt::Display for RoleSelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitReached => write!(
                f,
                "You can select at most {} auto-roles. Remove one before adding another.",
                MAX_AUTO_ROLES
            ),
        }
    }
}

impl std::error::Error for RoleSelectionError {}

/// Ordered auto-role selection capped at [`MAX_AUTO_ROLES`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleSelection {
    ids: Vec<u64>,
}

impl RoleSelection {
    /// Builds a selection from persisted IDs.
    ///
    /// Stored documents are trusted as-is; the cap applies to additions only.
    pub fn from_ids(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, role_id: u64) -> bool {
        self.ids.contains(&role_id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_AUTO_ROLES
    }

    /// Removes the role if selected, otherwise appends it.
    ///
    /// # Returns
    /// - `Ok(true)` - Role is now selected
    /// - `Ok(false)` - Role was deselected
    /// - `Err(RoleSelectionError::LimitReached)` - Selection already full, left unchanged
    pub fn toggle(&mut self, role_id: u64) -> Result<bool, RoleSelectionError> {
        if let Some(index) = self.ids.iter().position(|id| *id == role_id) {
            self.ids.remove(index);
            return Ok(false);
        }

        if self.is_full() {
            return Err(RoleSelectionError::LimitReached);
        }

        self.ids.push(role_id);
        Ok(true)
    }
}

/// Values substituted into a welcome message template.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeContext<'a> {
    pub user: &'a str,
    pub guild: &'a str,
    pub member_count: u64,
}

/// Replaces `{user}`, `{guild}` and `{member_count}`; unknown placeholders are kept.
///
/// Substituted values are never scanned again, so a username such as `{guild}` stays literal.
pub fn render_welcome_message(template: &str, context: &WelcomeContext<'_>) -> String {
    let member_count = context.member_count.to_string();
    let placeholders = [
        ("{user}", context.user),
        ("{guild}", context.guild),
        ("{member_count}", member_count.as_str()),
    ];

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        rest = &rest[start..];

        match placeholders
            .iter()
            .find(|(placeholder, _)| rest.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                rendered.push_str(value);
                rest = &rest[placeholder.len()..];
            }
            None => {
                rendered.push('{');
                rest = &rest[1..];
            }
        }
    }
    rendered.push_str(rest);

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_role_is_rejected_and_selection_unchanged() {
        let mut selection = RoleSelection::default();
        for id in 1..=5 {
            assert_eq!(selection.toggle(id), Ok(true));
        }

        let before = selection.clone();
        assert_eq!(selection.toggle(6), Err(RoleSelectionError::LimitReached));
        assert_eq!(selection, before);
        assert_eq!(selection.ids(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn selection_never_exceeds_limit_for_any_sequence() {
        let mut selection = RoleSelection::default();
        let sequence = [1, 2, 3, 1, 4, 5, 6, 7, 2, 8, 9, 10, 3, 3, 11];

        for id in sequence {
            let _ = selection.toggle(id);
            assert!(selection.len() <= MAX_AUTO_ROLES);
        }
    }

    #[test]
    fn toggling_off_removes_exactly_that_id() {
        let mut selection = RoleSelection::from_ids(vec![30, 10, 20]);

        assert_eq!(selection.toggle(10), Ok(false));
        assert_eq!(selection.ids(), &[30, 20]);

        assert_eq!(selection.toggle(20), Ok(false));
        assert_eq!(selection.ids(), &[30]);
    }

    #[test]
    fn deselecting_is_allowed_when_full() {
        let mut selection = RoleSelection::from_ids(vec![1, 2, 3, 4, 5]);

        assert_eq!(selection.toggle(3), Ok(false));
        assert_eq!(selection.toggle(6), Ok(true));
        assert_eq!(selection.ids(), &[1, 2, 4, 5, 6]);
    }

    #[test]
    fn default_settings_use_template() {
        let settings = GuildSettingsDto::default();

        assert!(settings.auto_role_ids.is_empty());
        assert_eq!(settings.welcome_channel_id, None);
        assert_eq!(
            settings.welcome_message,
            "Welcome {user} to {guild}! You are the {member_count}th member."
        );
    }

    #[test]
    fn renders_all_placeholders() {
        let context = WelcomeContext {
            user: "@nelly",
            guild: "Rustaceans",
            member_count: 42,
        };

        assert_eq!(
            render_welcome_message(DEFAULT_WELCOME_MESSAGE, &context),
            "Welcome @nelly to Rustaceans! You are the 42th member."
        );
        assert_eq!(
            render_welcome_message("Hi {user}, see {rules}", &context),
            "Hi @nelly, see {rules}"
        );
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let context = WelcomeContext {
            user: "{guild}",
            guild: "{member_count} Club",
            member_count: 7,
        };

        assert_eq!(
            render_welcome_message("{user} joined {guild} as #{member_count}", &context),
            "{guild} joined {member_count} Club as #7"
        );
    }

    #[test]
    fn braces_around_placeholders_are_kept() {
        let context = WelcomeContext {
            user: "@nelly",
            guild: "Rustaceans",
            member_count: 3,
        };

        assert_eq!(
            render_welcome_message("{{user}} {guild", &context),
            "{@nelly} {guild"
        );
    }
}
