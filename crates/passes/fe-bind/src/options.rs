//! Binder configuration

use anyhow::{Context, Result};
use fe_decl::ShadowPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a [`crate::Binder`] run
///
/// Every field has a default, so an empty file is a valid configuration:
///
/// ```toml
/// shadow_policy = "reject-in-current-scope"
/// max_suggestions = 1
/// allow_param_initializers = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindOptions {
    /// When a block-scope declaration collides with an outer one
    pub shadow_policy: ShadowPolicy,

    /// How many "did you mean" names an undefined identifier lists
    pub max_suggestions: usize,

    /// Accept parameters that carry an initializer
    pub allow_param_initializers: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            shadow_policy: ShadowPolicy::default(),
            max_suggestions: 3,
            allow_param_initializers: false,
        }
    }
}

impl BindOptions {
    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown key
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse binder options")
    }

    /// Load options from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read binder options: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse binder options: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let options = BindOptions::from_toml_str("").unwrap();
        assert_eq!(options, BindOptions::default());
        assert_eq!(options.shadow_policy, ShadowPolicy::RejectIfVisible);
        assert_eq!(options.max_suggestions, 3);
        assert!(!options.allow_param_initializers);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let options = BindOptions::from_toml_str(
            r#"
            shadow_policy = "reject-in-current-scope"
            max_suggestions = 1
            "#,
        )
        .unwrap();
        assert_eq!(options.shadow_policy, ShadowPolicy::RejectInCurrentScope);
        assert_eq!(options.max_suggestions, 1);
        assert!(!options.allow_param_initializers);
    }

    #[test]
    fn test_unknown_keys_and_bad_policy_are_rejected() {
        assert!(BindOptions::from_toml_str("max_suggestion = 2").is_err());
        assert!(BindOptions::from_toml_str(r#"shadow_policy = "never""#).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_param_initializers = true").unwrap();

        let options = BindOptions::from_file(file.path()).unwrap();
        assert!(options.allow_param_initializers);

        let missing = BindOptions::from_file(Path::new("/nonexistent/bind.toml"));
        let message = format!("{:#}", missing.unwrap_err());
        assert!(message.contains("Failed to read binder options"), "{message}");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let options = BindOptions {
            shadow_policy: ShadowPolicy::RejectInCurrentScope,
            max_suggestions: 5,
            allow_param_initializers: true,
        };
        let text = toml::to_string(&options).unwrap();
        assert!(text.contains(r#"shadow_policy = "reject-in-current-scope""#), "{text}");
        assert_eq!(BindOptions::from_toml_str(&text).unwrap(), options);
    }
}
