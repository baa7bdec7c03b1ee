//! Settings that control component override discovery
//!
//! Settings come from a `[test]` table in a TOML file or from environment
//! variables. Anything not set falls back to the defaults.

use reinhardt_di::{DiError, DiResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the default [`EnclosingConfiguration`].
pub const ENCLOSING_CONFIGURATION_ENV: &str = "REINHARDT_TEST_ENCLOSING_CONFIGURATION";

/// Whether a nested test class sees the overrides of its enclosing class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnclosingConfiguration {
	/// Overrides declared on enclosing classes apply to the nested class.
	#[default]
	Inherit,
	/// The nested class only sees its own overrides (and those of its parents).
	Override,
}

impl FromStr for EnclosingConfiguration {
	type Err = DiError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"inherit" => Ok(Self::Inherit),
			"override" => Ok(Self::Override),
			other => Err(DiError::Settings(format!(
				"invalid enclosing configuration '{}', expected 'inherit' or 'override'",
				other
			))),
		}
	}
}

impl fmt::Display for EnclosingConfiguration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Inherit => f.write_str("inherit"),
			Self::Override => f.write_str("override"),
		}
	}
}

/// Override discovery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverrideSettings {
	/// Applied to nested classes that do not declare their own configuration.
	pub enclosing_configuration: EnclosingConfiguration,
}

#[derive(Deserialize)]
struct SettingsFile {
	#[serde(default)]
	test: OverrideSettings,
}

impl OverrideSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_enclosing_configuration(mut self, configuration: EnclosingConfiguration) -> Self {
		self.enclosing_configuration = configuration;
		self
	}

	/// Parses the `[test]` table of a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_test::settings::{EnclosingConfiguration, OverrideSettings};
	///
	/// let settings = OverrideSettings::from_toml_str(
	///     "[test]\nenclosing_configuration = \"override\"\n",
	/// )
	/// .unwrap();
	/// assert_eq!(settings.enclosing_configuration, EnclosingConfiguration::Override);
	/// ```
	pub fn from_toml_str(content: &str) -> DiResult<Self> {
		let file: SettingsFile =
			toml::from_str(content).map_err(|e| DiError::Settings(e.to_string()))?;
		Ok(file.test)
	}

	/// Reads settings from the process environment.
	///
	/// # Errors
	///
	/// Returns [`DiError::Settings`] if a variable is set to an unsupported value.
	pub fn from_env() -> DiResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DiResult<Self> {
		let mut settings = Self::default();
		if let Some(value) = lookup(ENCLOSING_CONFIGURATION_ENV) {
			settings.enclosing_configuration = value.parse()?;
		}
		Ok(settings)
	}
}
