use crate::routes::{auth, chat, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "medibot-server",
    description = "Healthcare chatbot API: keyword replies, chat history and login sessions",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(auth::AuthApi::openapi());
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_public_route_is_documented() {
        let paths = get_docs().paths.paths;
        for route in ["/health", "/get_response", "/recent_chats", "/signup", "/login", "/logout"] {
            assert!(paths.contains_key(route), "missing {route}");
        }
    }
}
