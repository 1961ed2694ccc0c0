//! Localized message formatting.
//!
//! Help and notice texts are looked up by template key and formatted with
//! named substitution values, so applications can plug in their own
//! localization backend without this crate knowing about it. The built-in
//! [`EnglishMessages`] catalog covers the keys the mapper emits.

use std::fmt;

use indexmap::IndexMap;
use tracing::warn;

/// Template keys the mapper formats.
pub mod keys {
    /// Warning that submitting a new password resets the stored one.
    /// Substitutes `{label}`.
    pub const PASSWORD_RESET_HELPER_TEXT: &str = "password-reset-helper-text";
    /// Notice for authentication types the schema does not cover.
    /// Substitutes `{authtype}`.
    pub const UNSUPPORTED_AUTH_TYPE: &str = "unsupported-auth-type";
}

/// Message-formatting facility.
///
/// `args` are named substitution pairs applied to the template's `{name}`
/// placeholders. Implementations must not panic on unknown keys; degrade
/// to something renderable instead.
pub trait Messages: fmt::Debug + Send + Sync {
    /// Format the template registered under `key`.
    fn format(&self, key: &str, args: &[(&str, &str)]) -> String;
}

/// Built-in English catalog.
#[derive(Debug, Clone)]
pub struct EnglishMessages {
    templates: IndexMap<&'static str, &'static str>,
}

impl Default for EnglishMessages {
    fn default() -> Self {
        let mut templates = IndexMap::new();
        templates.insert(
            keys::PASSWORD_RESET_HELPER_TEXT,
            "Changing this resets your current {label}.",
        );
        templates.insert(
            keys::UNSUPPORTED_AUTH_TYPE,
            "Authentication type {authtype} is not currently supported.",
        );
        Self { templates }
    }
}

impl Messages for EnglishMessages {
    fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        match self.templates.get(key) {
            Some(template) => format_template(template, args),
            None => {
                warn!(key = key, "unknown message key");
                key.to_string()
            }
        }
    }
}

/// Substitute `{name}` placeholders with the given values.
///
/// Unmatched placeholders are left verbatim; unused args are ignored.
pub fn format_template(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_known_keys() {
        let messages = EnglishMessages::default();

        assert_eq!(
            messages.format(keys::PASSWORD_RESET_HELPER_TEXT, &[("label", "Password")]),
            "Changing this resets your current Password."
        );
        assert_eq!(
            messages.format(keys::UNSUPPORTED_AUTH_TYPE, &[("authtype", "kerberos")]),
            "Authentication type kerberos is not currently supported."
        );
    }

    #[test]
    fn unknown_key_degrades_to_the_key() {
        let messages = EnglishMessages::default();
        assert_eq!(messages.format("no-such-key", &[]), "no-such-key");
    }

    #[test]
    fn template_substitution_edge_cases() {
        assert_eq!(format_template("plain", &[]), "plain");
        assert_eq!(format_template("{a}{a}", &[("a", "x")]), "xx");
        assert_eq!(format_template("{missing}", &[("other", "x")]), "{missing}");
        assert_eq!(format_template("hi {label}.", &[("label", "")]), "hi .");
    }
}
