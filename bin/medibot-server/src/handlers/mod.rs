//! Request-independent logic called from the route handlers.

pub mod chat_log;
pub mod password;
