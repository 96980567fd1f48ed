//! Intents recognised by the responder and the canned reply for each.

use strum::{Display, EnumIter, IntoStaticStr};

/// What a user message is about, as decided by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    /// hi, hello, hey, good morning, good evening
    Greeting,
    BookAppointment,
    CancelAppointment,
    /// fever, cough, cold, headache, nausea, pain, vomit
    Symptom,
    DoctorReferral,
    Covid,
    Prescription,
    Emergency,
    Diet,
    MentalHealth,
    Vaccination,
    /// Nothing in the table matched.
    Fallback,
}

impl Intent {
    /// The reply sent back to the user for this intent.
    pub fn reply(self) -> &'static str {
        match self {
            Intent::Greeting => "Hello! How can I assist you with your health today?",
            Intent::BookAppointment => {
                "Sure, I can help you with that. What is your preferred date and time?"
            }
            Intent::CancelAppointment => "Please provide your appointment ID or name and date.",
            Intent::Symptom => {
                "I'm sorry you're experiencing that. How long have you had these symptoms?"
            }
            Intent::DoctorReferral => {
                "Please tell me your symptoms, and I will recommend a specialist."
            }
            Intent::Covid => {
                "If you suspect COVID-19, please isolate and get tested. \
                 You can book a test through our platform."
            }
            Intent::Prescription => {
                "To issue a prescription, I need your symptoms and doctor’s recommendation."
            }
            Intent::Emergency => {
                "In case of emergency, please call 108 or visit the nearest hospital immediately."
            }
            Intent::Diet => {
                "Balanced diets depend on age and health. \
                 Would you like general tips or a custom plan?"
            }
            Intent::MentalHealth => {
                "Mental health matters. I recommend talking to our licensed counselors. \
                 Shall I schedule a session?"
            }
            Intent::Vaccination => {
                "Are you asking about COVID vaccine, flu shots, or child immunization?"
            }
            Intent::Fallback => {
                "I'm not sure how to help with that. Can you please elaborate or try rephrasing?"
            }
        }
    }

    /// Stable snake_case label, used as a structured log field.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn every_intent_has_a_distinct_reply() {
        let replies: HashSet<&str> = Intent::iter().map(Intent::reply).collect();
        assert_eq!(replies.len(), Intent::iter().count());
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(Intent::MentalHealth.label(), "mental_health");
        assert_eq!(Intent::BookAppointment.to_string(), "book_appointment");
    }

    #[test]
    fn continued_lines_keep_single_spaces() {
        assert_eq!(
            Intent::Covid.reply(),
            "If you suspect COVID-19, please isolate and get tested. You can book a test through our platform."
        );
        assert!(!Intent::MentalHealth.reply().contains("  "));
    }
}
