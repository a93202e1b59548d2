pub mod alert;
pub mod guild_icon;
pub mod header;
pub mod layout;
pub mod modal;
pub mod page;
pub mod protected_layout;
pub mod welcome_preview;

pub use alert::{ErrorAlert, NoticeAlert};
pub use guild_icon::GuildIcon;
pub use header::Header;
pub use layout::Layout;
pub use modal::{ConfirmationModal, Modal};
pub use page::{ErrorPage, LoadingPage, Page};
pub use protected_layout::RequiresLoggedIn;
pub use welcome_preview::WelcomePreview;
