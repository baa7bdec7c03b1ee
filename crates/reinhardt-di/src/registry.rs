//! Component registry
//!
//! Holds named component definitions and lazily instantiated singletons.
//! Definitions can be replaced after registration, which is how test contexts
//! swap in override values before any component is resolved.

use crate::{DiError, DiResult, TypeKey};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased, shared component instance.
pub type ComponentInstance = Arc<dyn Any + Send + Sync>;

/// Produces a fresh component instance.
pub type ComponentFactory = Arc<dyn Fn() -> DiResult<ComponentInstance> + Send + Sync>;

/// Describes how a component of a given type is produced.
#[derive(Clone)]
pub struct ComponentDefinition {
	type_key: TypeKey,
	factory: ComponentFactory,
	origin: Option<String>,
}

impl ComponentDefinition {
	/// Creates a definition from a typed factory closure.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_di::{ComponentDefinition, TypeKey};
	///
	/// let definition = ComponentDefinition::new(|| 42i32);
	/// assert_eq!(definition.type_key(), TypeKey::of::<i32>());
	/// ```
	pub fn new<T, F>(factory: F) -> Self
	where
		T: Any + Send + Sync,
		F: Fn() -> T + Send + Sync + 'static,
	{
		Self {
			type_key: TypeKey::of::<T>(),
			factory: Arc::new(move || Ok(Arc::new(factory()) as ComponentInstance)),
			origin: None,
		}
	}

	/// Creates a definition that always yields a clone of `value`.
	pub fn from_value<T>(value: T) -> Self
	where
		T: Any + Clone + Send + Sync,
	{
		Self::new(move || value.clone())
	}

	/// Creates a definition that always yields the same shared instance.
	pub fn from_instance(type_key: TypeKey, instance: ComponentInstance) -> Self {
		Self {
			type_key,
			factory: Arc::new(move || Ok(Arc::clone(&instance))),
			origin: None,
		}
	}

	/// Creates a definition from an already type-erased factory.
	///
	/// The produced instances are checked against `type_key` when instantiated.
	pub fn from_factory(type_key: TypeKey, factory: ComponentFactory) -> Self {
		Self {
			type_key,
			factory,
			origin: None,
		}
	}

	/// Records where this definition came from (for example the test field
	/// that overrides it).
	pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
		self.origin = Some(origin.into());
		self
	}

	pub fn type_key(&self) -> TypeKey {
		self.type_key
	}

	pub fn origin(&self) -> Option<&str> {
		self.origin.as_deref()
	}

	fn same_factory(&self, other: &ComponentDefinition) -> bool {
		Arc::ptr_eq(&self.factory, &other.factory)
	}

	/// Runs the factory and verifies the produced instance has the declared type.
	pub fn instantiate(&self, name: &str) -> DiResult<ComponentInstance> {
		let instance = (self.factory)()?;
		if (*instance).type_id() != self.type_key.id() {
			return Err(DiError::TypeMismatch {
				name: name.to_string(),
				expected: self.type_key.to_string(),
				actual: "a value of a different type".to_string(),
			});
		}
		Ok(instance)
	}
}

impl fmt::Debug for ComponentDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentDefinition")
			.field("type_key", &self.type_key)
			.field("origin", &self.origin)
			.finish_non_exhaustive()
	}
}

/// Registry of named component definitions.
///
/// Instances are created on first resolution and cached for the lifetime of the
/// registry. Registering or replacing a definition evicts its cached instance.
///
/// # Examples
///
/// ```
/// use reinhardt_di::ComponentRegistry;
///
/// let registry = ComponentRegistry::new();
/// registry.register_value("greeting", "hello".to_string());
///
/// let greeting = registry.get::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "hello");
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
	definitions: RwLock<IndexMap<String, ComponentDefinition>>,
	instances: RwLock<HashMap<String, ComponentInstance>>,
}

impl ComponentRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a definition under `name`, returning the definition it replaced.
	pub fn register(
		&self,
		name: impl Into<String>,
		definition: ComponentDefinition,
	) -> Option<ComponentDefinition> {
		let name = name.into();
		tracing::trace!(component = %name, type_name = %definition.type_key(), "registering component");
		let previous = self.definitions.write().insert(name.clone(), definition);
		self.instances.write().remove(&name);
		previous
	}

	/// Registers a fixed value under `name`.
	pub fn register_value<T>(&self, name: impl Into<String>, value: T) -> Option<ComponentDefinition>
	where
		T: Any + Clone + Send + Sync,
	{
		self.register(name, ComponentDefinition::from_value(value))
	}

	/// Replaces an existing definition, returning the previous one.
	///
	/// # Errors
	///
	/// Returns [`DiError::NotFound`] if no definition is registered under `name`.
	pub fn replace(
		&self,
		name: &str,
		definition: ComponentDefinition,
	) -> DiResult<ComponentDefinition> {
		let previous = {
			let mut definitions = self.definitions.write();
			let slot = definitions
				.get_mut(name)
				.ok_or_else(|| DiError::NotFound(format!("no definition named '{}'", name)))?;
			std::mem::replace(slot, definition)
		};
		self.instances.write().remove(name);
		Ok(previous)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.definitions.read().contains_key(name)
	}

	pub fn definition(&self, name: &str) -> Option<ComponentDefinition> {
		self.definitions.read().get(name).cloned()
	}

	/// Names of all definitions producing `type_key`, in registration order.
	pub fn names_for_type(&self, type_key: &TypeKey) -> Vec<String> {
		self.definitions
			.read()
			.iter()
			.filter(|(_, definition)| definition.type_key() == *type_key)
			.map(|(name, _)| name.clone())
			.collect()
	}

	/// Resolves the single definition name registered for `type_key`.
	///
	/// # Errors
	///
	/// Returns [`DiError::NotFound`] when nothing matches and
	/// [`DiError::AmbiguousComponent`] when several definitions match.
	pub fn unique_name_for_type(&self, type_key: &TypeKey) -> DiResult<String> {
		let mut candidates = self.names_for_type(type_key);
		match candidates.len() {
			0 => Err(DiError::NotFound(format!(
				"no definition of type {}",
				type_key
			))),
			1 => Ok(candidates.remove(0)),
			_ => Err(DiError::AmbiguousComponent {
				type_name: type_key.to_string(),
				candidates,
			}),
		}
	}

	pub fn names(&self) -> Vec<String> {
		self.definitions.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.definitions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.read().is_empty()
	}

	/// Returns the cached instance for `name`, creating it on first access.
	///
	/// An instance is only cached if its definition is still registered once
	/// the factory returns. Otherwise the current definition is instantiated.
	pub fn instance(&self, name: &str) -> DiResult<ComponentInstance> {
		loop {
			if let Some(instance) = self.instances.read().get(name) {
				return Ok(Arc::clone(instance));
			}

			let definition = self
				.definition(name)
				.ok_or_else(|| DiError::NotFound(format!("no definition named '{}'", name)))?;
			let instance = definition.instantiate(name)?;

			let mut instances = self.instances.write();
			let current = self
				.definitions
				.read()
				.get(name)
				.is_some_and(|registered| registered.same_factory(&definition));
			if !current {
				tracing::trace!(component = %name, "definition replaced during instantiation");
				continue;
			}

			// Another caller may have raced us; the first stored instance wins
			let stored = instances
				.entry(name.to_string())
				.or_insert_with(|| instance);
			return Ok(Arc::clone(stored));
		}
	}

	/// Resolves the component named `name` as a `T`.
	///
	/// # Errors
	///
	/// Returns [`DiError::TypeMismatch`] if the definition produces another type.
	pub fn get<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
		let expected = TypeKey::of::<T>();
		if let Some(definition) = self.definition(name)
			&& definition.type_key() != expected
		{
			return Err(DiError::TypeMismatch {
				name: name.to_string(),
				expected: expected.to_string(),
				actual: definition.type_key().to_string(),
			});
		}
		self.instance(name)?
			.downcast::<T>()
			.map_err(|_| DiError::TypeMismatch {
				name: name.to_string(),
				expected: expected.to_string(),
				actual: "a value of a different type".to_string(),
			})
	}

	/// Resolves the single component of type `T`.
	pub fn get_by_type<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
		let name = self.unique_name_for_type(&TypeKey::of::<T>())?;
		self.get::<T>(&name)
	}
}

impl fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentRegistry")
			.field("definitions", &*self.definitions.read())
			.finish_non_exhaustive()
	}
}
