//! Error types for component resolution and override configuration

use thiserror::Error;

/// Errors raised by the component container and by override discovery
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
	#[error("Invalid override configuration: {0}")]
	InvalidOverrideConfiguration(String),

	#[error("Component not found: {0}")]
	NotFound(String),

	#[error("Expected a single component of type {type_name} but found {}: {}", .candidates.len(), .candidates.join(", "))]
	AmbiguousComponent {
		type_name: String,
		candidates: Vec<String>,
	},

	#[error("Component '{name}' has type {actual}, expected {expected}")]
	TypeMismatch {
		name: String,
		expected: String,
		actual: String,
	},

	#[error("Settings error: {0}")]
	Settings(String),
}

pub type DiResult<T> = Result<T, DiError>;
