//! Request / response bodies shared by the route handlers and the OpenAPI docs.

pub mod auth;
pub mod chat;
