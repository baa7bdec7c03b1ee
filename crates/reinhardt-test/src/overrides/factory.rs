//! Discovers component overrides declared on a test class

use super::customizer::OverrideContextCustomizer;
use super::metadata::OverrideMetadata;
use super::processor::DiscoveryContext;
use super::test_class::TestClass;
use crate::settings::OverrideSettings;
use reinhardt_di::{DiError, DiResult};

/// Supplementary context configuration declared by a test class.
///
/// Passed through to customizer factories; override discovery does not use it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextConfigurationAttributes {
	pub declaring_class: String,
	pub locations: Vec<String>,
}

impl ContextConfigurationAttributes {
	pub fn new(declaring_class: impl Into<String>) -> Self {
		Self {
			declaring_class: declaring_class.into(),
			locations: Vec::new(),
		}
	}

	pub fn with_location(mut self, location: impl Into<String>) -> Self {
		self.locations.push(location.into());
		self
	}
}

/// Creates an [`OverrideContextCustomizer`] for test classes that declare
/// component overrides.
///
/// Overrides are collected from the test class, from its parent classes and,
/// unless a class opts out with [`EnclosingConfiguration::Override`], from its
/// enclosing classes.
///
/// # Examples
///
/// ```
/// use reinhardt_test::overrides::{
///     FieldDescriptor, OverrideContextCustomizerFactory, TestBean, TestClass,
/// };
///
/// let factory = OverrideContextCustomizerFactory::new();
///
/// let plain = TestClass::builder("PlainTests").build();
/// assert!(factory.create_context_customizer(&plain, &[]).unwrap().is_none());
///
/// let overriding = TestClass::builder("OverridingTests")
///     .field(FieldDescriptor::new::<String>("descriptor").with_marker(TestBean::new()))
///     .static_method("descriptor", || "Overridden descriptor".to_string())
///     .build();
/// let customizer = factory
///     .create_context_customizer(&overriding, &[])
///     .unwrap()
///     .unwrap();
/// assert_eq!(customizer.metadata().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OverrideContextCustomizerFactory {
	settings: OverrideSettings,
}

impl OverrideContextCustomizerFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(settings: OverrideSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &OverrideSettings {
		&self.settings
	}

	/// Returns a customizer for `test_class`, or `None` when nothing in its
	/// hierarchy declares an override.
	///
	/// # Errors
	///
	/// Returns [`DiError::InvalidOverrideConfiguration`] if a marker cannot be
	/// resolved or two markers describe the same override. No customizer is
	/// produced in that case, even if other markers are valid.
	pub fn create_context_customizer(
		&self,
		test_class: &TestClass,
		_configurations: &[ContextConfigurationAttributes],
	) -> DiResult<Option<OverrideContextCustomizer>> {
		let metadata = self.find_metadata(test_class)?;
		if metadata.is_empty() {
			tracing::trace!(test_class = %test_class.name(), "no component overrides declared");
			return Ok(None);
		}

		tracing::debug!(
			test_class = %test_class.name(),
			count = metadata.len(),
			"discovered component overrides"
		);
		Ok(Some(OverrideContextCustomizer::new(metadata)))
	}

	/// Resolves every override marker visible from `test_class`.
	pub fn find_metadata(&self, test_class: &TestClass) -> DiResult<Vec<OverrideMetadata>> {
		let context = DiscoveryContext::new(&self.settings);
		let mut metadata: Vec<OverrideMetadata> = Vec::new();

		for class in hierarchy(&context, test_class) {
			for field in class.fields() {
				for marker in field.markers() {
					let resolved = marker.create_metadata(field, class, &context)?;
					if let Some(existing) = metadata.iter().find(|m| **m == resolved) {
						return Err(DiError::InvalidOverrideConfiguration(format!(
							"Duplicate component override discovered in test class {}: {} duplicates {}",
							test_class.name(),
							resolved,
							existing
						)));
					}
					tracing::trace!(override_metadata = %resolved, "resolved override marker");
					metadata.push(resolved);
				}
			}
		}

		Ok(metadata)
	}
}

/// Classes whose fields are scanned, outermost enclosing class first and
/// parents before children. Each class appears once.
fn hierarchy<'a>(context: &DiscoveryContext<'_>, test_class: &'a TestClass) -> Vec<&'a TestClass> {
	let mut levels = vec![test_class];
	let mut current = test_class;
	while let Some(enclosing) = context.visible_enclosing(current) {
		levels.push(enclosing);
		current = enclosing;
	}

	let mut ordered: Vec<&'a TestClass> = Vec::new();
	for level in levels.into_iter().rev() {
		let mut lineage = vec![level];
		let mut ancestor = level;
		while let Some(parent) = ancestor.parent() {
			lineage.push(parent);
			ancestor = parent;
		}
		for class in lineage.into_iter().rev() {
			if !ordered.iter().any(|seen| std::ptr::eq(*seen, class)) {
				ordered.push(class);
			}
		}
	}

	tracing::trace!(
		test_class = %test_class.name(),
		classes = ?ordered.iter().map(|c| c.name()).collect::<Vec<_>>(),
		"scanning test class hierarchy"
	);
	ordered
}
