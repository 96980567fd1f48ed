//! The ordered rule table.
//!
//! Each [`Rule`] pairs an [`Intent`] with a [`Matcher`]. Rules are evaluated
//! top to bottom against the lowercased message and the first one that
//! matches decides the reply, so a message mentioning both "covid" and
//! "vaccine" gets the COVID reply. Reordering this table changes behaviour.

use std::sync::LazyLock;

use regex::Regex;

use crate::intent::Intent;

/// How a rule tests a (lowercased) message.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// The pattern must match on word boundaries.
    WholeWord(Regex),
    /// Every keyword must appear as a substring.
    AllOf(&'static [&'static str]),
    /// At least one keyword must appear as a substring.
    AnyOf(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::WholeWord(re) => re.is_match(text),
            Matcher::AllOf(words) => words.iter().all(|w| text.contains(w)),
            Matcher::AnyOf(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub intent: Intent,
    pub matcher: Matcher,
}

impl Rule {
    fn new(intent: Intent, matcher: Matcher) -> Self {
        Self { intent, matcher }
    }
}

pub const GREETINGS: &[&str] = &["hi", "hello", "hey", "good morning", "good evening"];
pub const SYMPTOMS: &[&str] = &["fever", "cough", "cold", "headache", "nausea", "pain", "vomit"];

// The pattern is a compile-time constant, so failure here is a programming error.
static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", GREETINGS.join("|"))).expect("greeting pattern is valid")
});

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(Intent::Greeting, Matcher::WholeWord(GREETING_PATTERN.clone())),
        Rule::new(Intent::BookAppointment, Matcher::AllOf(&["book", "appointment"])),
        Rule::new(Intent::CancelAppointment, Matcher::AllOf(&["cancel", "appointment"])),
        Rule::new(Intent::Symptom, Matcher::AnyOf(SYMPTOMS)),
        Rule::new(Intent::DoctorReferral, Matcher::AnyOf(&["which doctor", "see a doctor"])),
        Rule::new(Intent::Covid, Matcher::AnyOf(&["covid", "corona"])),
        Rule::new(Intent::Prescription, Matcher::AnyOf(&["prescription"])),
        Rule::new(Intent::Emergency, Matcher::AnyOf(&["emergency", "urgent"])),
        Rule::new(Intent::Diet, Matcher::AnyOf(&["diet", "nutrition"])),
        Rule::new(Intent::MentalHealth, Matcher::AnyOf(&["stress", "anxiety", "depression"])),
        Rule::new(Intent::Vaccination, Matcher::AnyOf(&["vaccine"])),
    ]
});

/// The rule table in evaluation order. [`Intent::Fallback`] is implicit and
/// has no entry.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// First intent whose rule matches `normalized`, which must already be
/// lowercased.
pub(crate) fn first_match(normalized: &str) -> Intent {
    rules()
        .iter()
        .find(|rule| rule.matcher.matches(normalized))
        .map_or(Intent::Fallback, |rule| rule.intent)
}
