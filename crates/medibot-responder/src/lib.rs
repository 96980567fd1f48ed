//! medibot-responder – picks a canned healthcare reply for a chat message.
//!
//! The responder is a fixed, ordered table of keyword rules (see [`rules`]).
//! The message is lowercased, the first matching rule wins, and anything
//! unmatched gets the fallback reply. It holds no state, so it can be called
//! from any number of handlers at once.
//!
//! ```
//! use medibot_responder::{classify, respond, Intent};
//!
//! assert_eq!(classify("Hello there"), Intent::Greeting);
//! assert_eq!(respond("is it covid? do I need a vaccine?"), Intent::Covid.reply());
//! ```

pub mod intent;
pub mod rules;

pub use intent::Intent;
pub use rules::{rules, Matcher, Rule};

/// Select the intent for a raw user message.
pub fn classify(input: &str) -> Intent {
    rules::first_match(&input.to_lowercase())
}

/// Reply text for a raw user message. Never fails; empty input gets the
/// fallback reply.
pub fn respond(input: &str) -> &'static str {
    classify(input).reply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_wins_over_later_rules() {
        assert_eq!(classify("Hi, I have a fever"), Intent::Greeting);
        assert_eq!(classify("hey can I book an appointment"), Intent::Greeting);
        assert_eq!(classify("Good evening, emergency!"), Intent::Greeting);
        assert_eq!(classify("I need a vaccine, hello"), Intent::Greeting);
    }

    #[test]
    fn greeting_is_case_insensitive() {
        assert_eq!(respond("HELLO"), Intent::Greeting.reply());
        assert_eq!(respond("Good Morning"), Intent::Greeting.reply());
    }

    #[test]
    fn greeting_needs_a_whole_word() {
        assert_ne!(classify("shiny"), Intent::Greeting);
        assert_eq!(classify("shiny"), Intent::Fallback);
        assert_eq!(classify("this cough"), Intent::Symptom);
    }

    #[test]
    fn appointments() {
        assert_eq!(
            respond("I want to book an appointment"),
            "Sure, I can help you with that. What is your preferred date and time?"
        );
        assert_eq!(
            respond("cancel my appointment"),
            "Please provide your appointment ID or name and date."
        );
        // Booking is checked before cancelling.
        assert_eq!(
            classify("cancel the booked appointment"),
            Intent::BookAppointment
        );
        assert_eq!(classify("cancel my order"), Intent::Fallback);
    }

    #[test]
    fn symptoms() {
        assert_eq!(
            respond("I have a fever and cough"),
            "I'm sorry you're experiencing that. How long have you had these symptoms?"
        );
        assert_eq!(classify("terrible HEADACHE"), Intent::Symptom);
        // "pain" also matches inside larger words.
        assert_eq!(classify("painkillers"), Intent::Symptom);
    }

    #[test]
    fn symptom_beats_referral() {
        assert_eq!(classify("which doctor treats pain"), Intent::Symptom);
        assert_eq!(classify("which doctor should I visit"), Intent::DoctorReferral);
        assert_eq!(classify("I should see a doctor"), Intent::DoctorReferral);
    }

    #[test]
    fn covid_beats_vaccine() {
        assert_eq!(respond("covid vaccine"), Intent::Covid.reply());
        assert_eq!(classify("corona"), Intent::Covid);
        assert_eq!(classify("when is my vaccine due"), Intent::Vaccination);
    }

    #[test]
    fn remaining_rules() {
        assert_eq!(classify("need a prescription"), Intent::Prescription);
        assert_eq!(classify("this is urgent"), Intent::Emergency);
        assert_eq!(classify("nutrition plan"), Intent::Diet);
        assert_eq!(classify("I feel anxiety"), Intent::MentalHealth);
        assert_eq!(classify("depression"), Intent::MentalHealth);
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        assert_eq!(classify("urgent prescription"), Intent::Prescription);
        assert_eq!(classify("diet for stress"), Intent::Diet);
        assert_eq!(classify("stress about my vaccine"), Intent::MentalHealth);
    }

    #[test]
    fn empty_and_unknown_input_fall_back() {
        let fallback = "I'm not sure how to help with that. Can you please elaborate or try rephrasing?";
        assert_eq!(respond(""), fallback);
        assert_eq!(respond("   \t"), fallback);
        assert_eq!(respond("what's the weather"), fallback);
    }
}
