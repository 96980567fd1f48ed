pub mod chat;
pub mod session;
pub mod user;

pub use chat::{ChatEntry, NewChatEntry};
pub use session::UserSession;
pub use user::{NewUser, User};
