pub const SITE_NAME: &str = "Auto-Role Dashboard";

/// Member name used in the welcome message preview.
pub const PREVIEW_USER: &str = "@NewMember";
