//! Applies discovered overrides to a component registry

use super::metadata::{OverrideMetadata, OverrideStrategy};
use reinhardt_di::{
	ComponentDefinition, ComponentFactory, ComponentInstance, ComponentRegistry, DiError, DiResult,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Customizes the component registry of a test context with a set of overrides.
///
/// Equality and hashing ignore the order of the overrides, so two test classes
/// declaring the same overrides produce equal customizers and can share a
/// cached context.
#[derive(Debug, Clone)]
pub struct OverrideContextCustomizer {
	metadata: Vec<OverrideMetadata>,
}

impl OverrideContextCustomizer {
	pub(crate) fn new(metadata: Vec<OverrideMetadata>) -> Self {
		Self { metadata }
	}

	/// The overrides in discovery order.
	pub fn metadata(&self) -> &[OverrideMetadata] {
		&self.metadata
	}

	/// Applies every override to `registry`, in discovery order.
	///
	/// # Errors
	///
	/// - [`DiError::NotFound`] if a replaced or wrapped component does not exist
	/// - [`DiError::AmbiguousComponent`] if a by-type target matches several definitions
	/// - any error raised by an override factory
	pub fn customize_context(&self, registry: &ComponentRegistry) -> DiResult<()> {
		for metadata in &self.metadata {
			apply(metadata, registry)?;
		}
		Ok(())
	}
}

fn apply(metadata: &OverrideMetadata, registry: &ComponentRegistry) -> DiResult<()> {
	let target = resolve_target(metadata, registry)?;

	match (metadata.strategy(), target) {
		(OverrideStrategy::ReplaceDefinition, None) => Err(DiError::NotFound(format!(
			"Unable to override component {}: there is no definition to replace {}",
			metadata.origin(),
			describe_target(metadata)
		))),
		(OverrideStrategy::WrapComponent, None) => Err(DiError::NotFound(format!(
			"Unable to wrap component {}: there is no component to wrap {}",
			metadata.origin(),
			describe_target(metadata)
		))),
		(OverrideStrategy::ReplaceOrCreateDefinition, None) => {
			let name = metadata
				.component_name()
				.unwrap_or_else(|| metadata.field_name())
				.to_string();
			tracing::debug!(component = %name, origin = %metadata.origin(), "registering override");
			registry.register(&name, override_definition(metadata, None));
			Ok(())
		}
		(OverrideStrategy::WrapComponent, Some(name)) => {
			let existing = registry.instance(&name)?;
			tracing::debug!(component = %name, origin = %metadata.origin(), "wrapping component");
			registry.replace(&name, override_definition(metadata, Some(existing)))?;
			Ok(())
		}
		(_, Some(name)) => {
			tracing::debug!(component = %name, origin = %metadata.origin(), "replacing definition");
			registry.replace(&name, override_definition(metadata, None))?;
			Ok(())
		}
	}
}

/// Name of the existing definition targeted by `metadata`, if any.
fn resolve_target(
	metadata: &OverrideMetadata,
	registry: &ComponentRegistry,
) -> DiResult<Option<String>> {
	if let Some(name) = metadata.component_name() {
		return Ok(registry.contains(name).then(|| name.to_string()));
	}

	match registry.unique_name_for_type(&metadata.component_type()) {
		Ok(name) => Ok(Some(name)),
		Err(DiError::NotFound(_)) => Ok(None),
		Err(e) => Err(e),
	}
}

/// Builds the replacement definition. The factory runs when the component is
/// first resolved, and the produced instance is type-checked at that point.
fn override_definition(
	metadata: &OverrideMetadata,
	existing: Option<ComponentInstance>,
) -> ComponentDefinition {
	let source = metadata.clone();
	let factory: ComponentFactory = Arc::new(move || source.create_override(existing.clone()));
	ComponentDefinition::from_factory(metadata.component_type(), factory)
		.with_origin(metadata.origin())
}

fn describe_target(metadata: &OverrideMetadata) -> String {
	match metadata.component_name() {
		Some(name) => format!("with name '{}' and type {}", name, metadata.component_type()),
		None => format!("of type {}", metadata.component_type()),
	}
}

impl PartialEq for OverrideContextCustomizer {
	fn eq(&self, other: &Self) -> bool {
		self.metadata.len() == other.metadata.len()
			&& self.metadata.iter().all(|m| other.metadata.contains(m))
	}
}

impl Eq for OverrideContextCustomizer {}

impl Hash for OverrideContextCustomizer {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// Order-independent combination of the element hashes
		let combined = self
			.metadata
			.iter()
			.map(|metadata| {
				let mut hasher = DefaultHasher::new();
				metadata.hash(&mut hasher);
				hasher.finish()
			})
			.fold(0u64, u64::wrapping_add);
		self.metadata.len().hash(state);
		combined.hash(state);
	}
}
