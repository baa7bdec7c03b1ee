//! Declarative description of a test class
//!
//! A [`TestClass`] lists the fields a test declares, the factory functions it
//! provides and the classes it is related to. Nested tests point at their
//! enclosing class; a test may also extend a parent class whose fields and
//! factories it inherits.

use super::processor::OverrideProcessor;
use crate::settings::EnclosingConfiguration;
use reinhardt_di::{ComponentInstance, TypeKey};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Invokes a static factory function.
pub type StaticInvoker = Arc<dyn Fn() -> ComponentInstance + Send + Sync>;

/// A field declared on a test class, with the override markers attached to it.
#[derive(Clone)]
pub struct FieldDescriptor {
	name: String,
	declared_type: TypeKey,
	markers: Vec<Arc<dyn OverrideProcessor>>,
}

impl FieldDescriptor {
	/// Declares a field of type `T`.
	pub fn new<T: Any + Send + Sync>(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			declared_type: TypeKey::of::<T>(),
			markers: Vec::new(),
		}
	}

	/// Attaches an override marker to the field.
	pub fn with_marker<P: OverrideProcessor + 'static>(mut self, marker: P) -> Self {
		self.markers.push(Arc::new(marker));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn declared_type(&self) -> TypeKey {
		self.declared_type
	}

	pub fn markers(&self) -> &[Arc<dyn OverrideProcessor>] {
		&self.markers
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("declared_type", &self.declared_type)
			.field("markers", &self.markers)
			.finish()
	}
}

/// How a method is invoked.
#[derive(Clone)]
pub enum MethodKind {
	/// Callable without a test instance.
	Static(StaticInvoker),
	/// Requires a test instance; never usable as an override factory.
	Instance,
}

/// A function declared on a test class.
#[derive(Clone)]
pub struct FactoryMethod {
	name: String,
	return_type: TypeKey,
	parameter_count: usize,
	kind: MethodKind,
}

impl FactoryMethod {
	/// Declares a static, zero-argument function returning `T`.
	pub fn static_method<T, F>(name: impl Into<String>, factory: F) -> Self
	where
		T: Any + Send + Sync,
		F: Fn() -> T + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			return_type: TypeKey::of::<T>(),
			parameter_count: 0,
			kind: MethodKind::Static(Arc::new(move || Arc::new(factory()) as ComponentInstance)),
		}
	}

	/// Declares an instance method returning `T`.
	pub fn instance_method<T: Any + Send + Sync>(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			return_type: TypeKey::of::<T>(),
			parameter_count: 0,
			kind: MethodKind::Instance,
		}
	}

	pub fn with_parameter_count(mut self, count: usize) -> Self {
		self.parameter_count = count;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn return_type(&self) -> TypeKey {
		self.return_type
	}

	pub fn parameter_count(&self) -> usize {
		self.parameter_count
	}

	pub fn is_static(&self) -> bool {
		matches!(self.kind, MethodKind::Static(_))
	}

	/// The invoker of a static method, `None` for instance methods.
	pub fn static_invoker(&self) -> Option<&StaticInvoker> {
		match &self.kind {
			MethodKind::Static(invoker) => Some(invoker),
			MethodKind::Instance => None,
		}
	}
}

impl fmt::Debug for FactoryMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryMethod")
			.field("name", &self.name)
			.field("return_type", &self.return_type)
			.field("parameter_count", &self.parameter_count)
			.field("static", &self.is_static())
			.finish()
	}
}

/// A test class: its fields, its functions and the classes around it.
///
/// # Examples
///
/// ```
/// use reinhardt_test::overrides::{FieldDescriptor, TestBean, TestClass};
///
/// let outer = TestClass::builder("UserServiceTests")
///     .field(FieldDescriptor::new::<String>("name").with_marker(TestBean::new()))
///     .static_method("name", || "Overridden name".to_string())
///     .build();
///
/// let nested = TestClass::builder("WhenAnonymous").enclosing(outer).build();
/// assert_eq!(nested.enclosing().map(|c| c.name()), Some("UserServiceTests"));
/// ```
#[derive(Debug)]
pub struct TestClass {
	name: String,
	fields: Vec<FieldDescriptor>,
	methods: Vec<FactoryMethod>,
	enclosing: Option<Arc<TestClass>>,
	parent: Option<Arc<TestClass>>,
	enclosing_configuration: Option<EnclosingConfiguration>,
}

impl TestClass {
	pub fn builder(name: impl Into<String>) -> TestClassBuilder {
		TestClassBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	pub fn methods(&self) -> &[FactoryMethod] {
		&self.methods
	}

	/// The class this one is nested in.
	pub fn enclosing(&self) -> Option<&TestClass> {
		self.enclosing.as_deref()
	}

	/// The class this one extends.
	pub fn parent(&self) -> Option<&TestClass> {
		self.parent.as_deref()
	}

	/// The enclosing configuration declared directly on this class.
	pub fn enclosing_configuration(&self) -> Option<EnclosingConfiguration> {
		self.enclosing_configuration
	}

	/// Whether any field of this class carries an override marker.
	pub fn declares_overrides(&self) -> bool {
		self.fields.iter().any(|field| !field.markers().is_empty())
	}
}

/// Builder for [`TestClass`].
pub struct TestClassBuilder {
	name: String,
	fields: Vec<FieldDescriptor>,
	methods: Vec<FactoryMethod>,
	enclosing: Option<Arc<TestClass>>,
	parent: Option<Arc<TestClass>>,
	enclosing_configuration: Option<EnclosingConfiguration>,
}

impl TestClassBuilder {
	fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
			methods: Vec::new(),
			enclosing: None,
			parent: None,
			enclosing_configuration: None,
		}
	}

	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	pub fn method(mut self, method: FactoryMethod) -> Self {
		self.methods.push(method);
		self
	}

	/// Shorthand for adding a [`FactoryMethod::static_method`].
	pub fn static_method<T, F>(self, name: impl Into<String>, factory: F) -> Self
	where
		T: Any + Send + Sync,
		F: Fn() -> T + Send + Sync + 'static,
	{
		self.method(FactoryMethod::static_method(name, factory))
	}

	/// Shorthand for adding a [`FactoryMethod::instance_method`].
	pub fn instance_method<T: Any + Send + Sync>(self, name: impl Into<String>) -> Self {
		self.method(FactoryMethod::instance_method::<T>(name))
	}

	pub fn enclosing(mut self, enclosing: Arc<TestClass>) -> Self {
		self.enclosing = Some(enclosing);
		self
	}

	pub fn parent(mut self, parent: Arc<TestClass>) -> Self {
		self.parent = Some(parent);
		self
	}

	pub fn enclosing_configuration(mut self, configuration: EnclosingConfiguration) -> Self {
		self.enclosing_configuration = Some(configuration);
		self
	}

	pub fn build(self) -> Arc<TestClass> {
		Arc::new(TestClass {
			name: self.name,
			fields: self.fields,
			methods: self.methods,
			enclosing: self.enclosing,
			parent: self.parent,
			enclosing_configuration: self.enclosing_configuration,
		})
	}
}
