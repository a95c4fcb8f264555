// User input errors. All of them are reported through the browser's native form validation:
// the message is set as the custom validity of the offending input and the form is asked to
// report validity. None of these propagate any further.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use strum::{EnumIter, IntoStaticStr};


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ValidityError {
    DuplicateName,
    NotEnoughParticipants,
    IncompleteConstraint,
    NameTaken,
    NameUnchanged,
    ReservedPrefix,
    EmptyName,
    CheckFailed,
}

impl ValidityError {
    // Stable key used to look up a translation.
    pub fn key(self) -> &'static str { self.into() }

    pub fn default_message(self) -> &'static str {
        use ValidityError::*;
        match self {
            DuplicateName => "Each participant needs a unique name.",
            NotEnoughParticipants => "Please enter at least three participants.",
            IncompleteConstraint => "Please select a giver, a giftee and a rule.",
            NameTaken => "This name is already taken!",
            NameUnchanged => "This is already the current name.",
            ReservedPrefix => "Names cannot start with \"/\".",
            EmptyName => "Please enter a name.",
            CheckFailed => "Could not check whether this name is available. Please try again.",
        }
    }

    // Says nothing about the name itself, so it must not block the next attempt.
    pub fn is_transient(self) -> bool { self == ValidityError::CheckFailed }

    pub fn message(self, translator: &dyn Translator) -> String {
        translator.translate(self.key()).unwrap_or_else(|| self.default_message().to_owned())
    }
}

impl fmt::Display for ValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.default_message()) }
}

// Message lookup for the page language. Returns `None` for untranslated keys, in which case the
// English default is used.
pub trait Translator {
    fn translate(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, _key: &str) -> Option<String> { None }
}

// Message catalogue as served by the page: a flat JSON object from key to translated text.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    messages: HashMap<String, String>,
}

impl Catalogue {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> { serde_json::from_str(json) }
}

impl Translator for Catalogue {
    fn translate(&self, key: &str) -> Option<String> { self.messages.get(key).cloned() }
}


#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn catalogue_overrides_default() {
        let catalogue =
            Catalogue::from_json(r#"{"name_taken": "Dieser Name ist schon vergeben!"}"#).unwrap();
        assert_eq!(
            ValidityError::NameTaken.message(&catalogue),
            "Dieser Name ist schon vergeben!"
        );
        assert_eq!(
            ValidityError::DuplicateName.message(&catalogue),
            ValidityError::DuplicateName.default_message()
        );
    }

    #[test]
    fn every_message_is_non_empty() {
        for error in ValidityError::iter() {
            assert!(!error.message(&DefaultTranslator).is_empty(), "{error:?}");
        }
    }
}
