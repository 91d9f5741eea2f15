// rosterhub/src/utils/identifier.rs
use crate::models::Player;
use regex::Regex;

lazy_static::lazy_static! {
    static ref NON_DIGITS: Regex = Regex::new(r"[^0-9]").unwrap();
}

// A login identifier after classification and normalization.
// Phone numbers keep digits only; emails are trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

// Classify a raw identifier: at least 7 digits and no '@' means phone,
// anything else is treated as an email address.
pub fn classify(raw: &str) -> Identifier {
    let digits = NON_DIGITS.replace_all(raw, "").into_owned();
    if digits.len() >= 7 && !raw.contains('@') {
        Identifier::Phone(digits)
    } else {
        Identifier::Email(raw.trim().to_lowercase())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_phone(phone: &str) -> String {
    NON_DIGITS.replace_all(phone, "").into_owned()
}

impl Identifier {
    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Email(e) => e,
            Identifier::Phone(p) => p,
        }
    }

    // Match against a player's stored contact identifiers
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Identifier::Email(e) => player
                .email
                .as_deref()
                .map_or(false, |stored| normalize_email(stored) == *e),
            Identifier::Phone(p) => player
                .phone
                .as_deref()
                .map_or(false, |stored| normalize_phone(stored) == *p),
        }
    }
}
