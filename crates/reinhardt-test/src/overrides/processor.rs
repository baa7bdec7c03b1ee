//! Extension point turning a field marker into override metadata

use super::metadata::OverrideMetadata;
use super::test_class::{FieldDescriptor, TestClass};
use crate::settings::{EnclosingConfiguration, OverrideSettings};
use reinhardt_di::DiResult;
use std::fmt;

/// State shared by every marker resolved in one discovery pass.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryContext<'a> {
	settings: &'a OverrideSettings,
}

impl<'a> DiscoveryContext<'a> {
	pub fn new(settings: &'a OverrideSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &'a OverrideSettings {
		self.settings
	}

	/// Whether `test_class` sees its enclosing class.
	///
	/// The configuration declared on the class wins, then the one declared on
	/// its nearest enclosing class, then the settings default. Marker discovery
	/// and factory lookup both stop at classes for which this is `false`.
	pub fn inherits_enclosing(&self, test_class: &TestClass) -> bool {
		let mut current = Some(test_class);
		while let Some(class) = current {
			if let Some(configuration) = class.enclosing_configuration() {
				return configuration == EnclosingConfiguration::Inherit;
			}
			current = class.enclosing();
		}
		self.settings.enclosing_configuration == EnclosingConfiguration::Inherit
	}

	/// The enclosing class of `test_class`, if it is visible.
	pub fn visible_enclosing<'c>(&self, test_class: &'c TestClass) -> Option<&'c TestClass> {
		if self.inherits_enclosing(test_class) {
			test_class.enclosing()
		} else {
			None
		}
	}
}

/// Processes one kind of override marker.
///
/// Each marker attached to a [`FieldDescriptor`] implements this trait. During
/// discovery the marker is asked to resolve itself against the field and the
/// class declaring it.
///
/// # Example
///
/// ```rust
/// use reinhardt_di::{ComponentInstance, DiResult};
/// use reinhardt_test::overrides::{
///     DiscoveryContext, FieldDescriptor, OverrideMetadata, OverrideProcessor, OverrideStrategy,
///     TestClass,
/// };
/// use std::sync::Arc;
///
/// /// Registers a default value when the application has none.
/// #[derive(Debug)]
/// struct DefaultValue;
///
/// impl OverrideProcessor for DefaultValue {
///     fn create_metadata(
///         &self,
///         field: &FieldDescriptor,
///         declaring_class: &TestClass,
///         _context: &DiscoveryContext<'_>,
///     ) -> DiResult<OverrideMetadata> {
///         let metadata = OverrideMetadata::new(
///             field,
///             declaring_class,
///             "DefaultValue",
///             Arc::new(|_: Option<ComponentInstance>| {
///                 Ok(Arc::new(String::new()) as ComponentInstance)
///             }),
///         );
///         Ok(metadata.with_strategy(OverrideStrategy::ReplaceOrCreateDefinition))
///     }
/// }
/// ```
pub trait OverrideProcessor: Send + Sync + fmt::Debug {
	/// Resolves this marker into override metadata.
	///
	/// # Errors
	///
	/// Returns [`reinhardt_di::DiError::InvalidOverrideConfiguration`] when the
	/// marker cannot be resolved.
	fn create_metadata(
		&self,
		field: &FieldDescriptor,
		declaring_class: &TestClass,
		context: &DiscoveryContext<'_>,
	) -> DiResult<OverrideMetadata>;
}
