//! Resolved override metadata

use super::test_class::{FieldDescriptor, TestClass};
use reinhardt_di::{ComponentInstance, DiResult, TypeKey};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Produces the override instance.
///
/// Receives the existing instance when the strategy is
/// [`OverrideStrategy::WrapComponent`], `None` otherwise.
pub type OverrideFactory =
	Arc<dyn Fn(Option<ComponentInstance>) -> DiResult<ComponentInstance> + Send + Sync>;

/// How an override is applied to the component registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideStrategy {
	/// Replace an existing definition; fail if there is none.
	ReplaceDefinition,
	/// Replace an existing definition, or register a new one if there is none.
	ReplaceOrCreateDefinition,
	/// Keep the existing component and wrap its instance.
	WrapComponent,
}

impl fmt::Display for OverrideStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ReplaceDefinition => f.write_str("REPLACE_DEFINITION"),
			Self::ReplaceOrCreateDefinition => f.write_str("REPLACE_OR_CREATE_DEFINITION"),
			Self::WrapComponent => f.write_str("WRAP_COMPONENT"),
		}
	}
}

/// A resolved, ready-to-apply component override.
///
/// Two metadata values are equal when they target the same name and type with
/// the same strategy and the same factory; the field they were declared on does
/// not take part in equality.
#[derive(Clone)]
pub struct OverrideMetadata {
	component_name: Option<String>,
	component_type: TypeKey,
	strategy: OverrideStrategy,
	field_name: String,
	declaring_class: String,
	factory_identity: String,
	factory: OverrideFactory,
}

impl OverrideMetadata {
	/// Creates metadata for `field` on `declaring_class`, targeting the field's
	/// type with [`OverrideStrategy::ReplaceDefinition`].
	///
	/// `factory_identity` names the factory (for example `Class::method`) and is
	/// what distinguishes two overrides using different factories.
	pub fn new(
		field: &FieldDescriptor,
		declaring_class: &TestClass,
		factory_identity: impl Into<String>,
		factory: OverrideFactory,
	) -> Self {
		Self {
			component_name: None,
			component_type: field.declared_type(),
			strategy: OverrideStrategy::ReplaceDefinition,
			field_name: field.name().to_string(),
			declaring_class: declaring_class.name().to_string(),
			factory_identity: factory_identity.into(),
			factory,
		}
	}

	pub fn with_component_name(mut self, name: Option<String>) -> Self {
		self.component_name = name;
		self
	}

	pub fn with_strategy(mut self, strategy: OverrideStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// The targeted component name, `None` when resolved by type.
	pub fn component_name(&self) -> Option<&str> {
		self.component_name.as_deref()
	}

	pub fn component_type(&self) -> TypeKey {
		self.component_type
	}

	pub fn strategy(&self) -> OverrideStrategy {
		self.strategy
	}

	pub fn field_name(&self) -> &str {
		&self.field_name
	}

	pub fn declaring_class(&self) -> &str {
		&self.declaring_class
	}

	pub fn factory_identity(&self) -> &str {
		&self.factory_identity
	}

	/// `Class.field`, used to label registry definitions created from this override.
	pub fn origin(&self) -> String {
		format!("{}.{}", self.declaring_class, self.field_name)
	}

	/// Runs the factory.
	pub fn create_override(&self, existing: Option<ComponentInstance>) -> DiResult<ComponentInstance> {
		(self.factory)(existing)
	}
}

impl PartialEq for OverrideMetadata {
	fn eq(&self, other: &Self) -> bool {
		self.component_name == other.component_name
			&& self.component_type == other.component_type
			&& self.strategy == other.strategy
			&& self.factory_identity == other.factory_identity
	}
}

impl Eq for OverrideMetadata {}

impl Hash for OverrideMetadata {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.component_name.hash(state);
		self.component_type.hash(state);
		self.strategy.hash(state);
		self.factory_identity.hash(state);
	}
}

impl fmt::Debug for OverrideMetadata {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OverrideMetadata")
			.field("component_name", &self.component_name)
			.field("component_type", &self.component_type)
			.field("strategy", &self.strategy)
			.field("field", &self.origin())
			.field("factory", &self.factory_identity)
			.finish()
	}
}

impl fmt::Display for OverrideMetadata {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"[{}] {} -> {} (name: {}, factory: {})",
			self.strategy,
			self.origin(),
			self.component_type,
			self.component_name.as_deref().unwrap_or("<by type>"),
			self.factory_identity
		)
	}
}
