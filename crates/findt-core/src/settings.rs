//! Process-wide library settings.
//!
//! [`Settings`] holds the **weekday language** used when a date's weekday is
//! rendered as a name.  It is a singleton accessed via a
//! `std::sync::OnceLock`, with the value stored behind a `Mutex` so it can be
//! changed from any thread.  Tests that change it should restore it when done.

use std::sync::{Mutex, OnceLock};

/// Language used for weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// `Monday`, `Tuesday`, ...
    #[default]
    English,
    /// `segunda-feira`, `terça-feira`, ...
    Portuguese,
}

/// Process-wide settings used by findt.
pub struct Settings {
    language: Mutex<Language>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            language: Mutex::new(Language::default()),
        })
    }

    /// Return the language used for weekday names.
    pub fn language(&self) -> Language {
        // A poisoned lock still holds a valid `Copy` value.
        *self
            .language
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the language used for weekday names.
    pub fn set_language(&self, language: Language) {
        *self
            .language
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = language;
    }

    /// Restore the default language.
    pub fn reset(&self) {
        self.set_language(Language::default());
    }
}
