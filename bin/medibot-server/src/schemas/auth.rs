use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Form fields for `POST /signup`. Absent fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl SignupForm {
    /// Trim username and email. The password is kept verbatim.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password,
        }
    }
}

/// Form fields for `POST /login`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Warning,
    Danger,
}

/// A short user-facing status message, plus the page the front-end should
/// show next.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub redirect: Option<String>,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            redirect: None,
        }
    }

    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_fields_fail_validation_after_trim() {
        let form = SignupForm {
            username: "   ".into(),
            email: "a@b.c".into(),
            password: "pw".into(),
        }
        .normalized();
        assert!(form.validate().is_err());
    }

    #[test]
    fn password_is_not_trimmed() {
        let form = SignupForm {
            username: " meera ".into(),
            email: " meera@example.com ".into(),
            password: " pw ".into(),
        }
        .normalized();
        assert!(form.validate().is_ok());
        assert_eq!(form.username, "meera");
        assert_eq!(form.email, "meera@example.com");
        assert_eq!(form.password, " pw ");
    }

    #[test]
    fn flash_serializes_lowercase_category() {
        let json = serde_json::to_value(Flash::new(FlashCategory::Danger, "Invalid credentials."))
            .expect("json");
        assert_eq!(json["category"], "danger");
        assert!(json.get("redirect").is_none());
    }
}
