//! `TestBean` marker: replace a component with the value of a static factory
//!
//! The factory is looked up by name on the declaring class, its parents and the
//! enclosing classes it inherits from. It must be static, take no arguments and return exactly
//! the field's type.

use super::metadata::{OverrideMetadata, OverrideStrategy};
use super::processor::{DiscoveryContext, OverrideProcessor};
use super::test_class::{FactoryMethod, FieldDescriptor, StaticInvoker, TestClass};
use reinhardt_di::{ComponentInstance, DiError, DiResult, TypeKey};
use std::collections::HashSet;
use std::sync::Arc;

/// Marks a field whose component is replaced by the result of a static factory.
///
/// Without an explicit name the component is located by the field's type.
/// Without an explicit method name the factory is expected to share the
/// field's name.
///
/// # Examples
///
/// ```
/// use reinhardt_test::overrides::{FieldDescriptor, TestBean};
///
/// let field = FieldDescriptor::new::<i32>("counter")
///     .with_marker(TestBean::new().with_name("counterBean").with_method_name("counter"));
/// assert_eq!(field.markers().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestBean {
	name: Option<String>,
	method_name: Option<String>,
}

impl TestBean {
	pub fn new() -> Self {
		Self::default()
	}

	/// Targets the component registered under `name` instead of resolving by type.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
		self.method_name = Some(method_name.into());
		self
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn method_name(&self) -> Option<&str> {
		self.method_name.as_deref()
	}

	fn candidate_names(&self, field: &FieldDescriptor) -> Vec<String> {
		match self.method_name.as_deref().filter(|name| !name.is_empty()) {
			Some(name) => vec![name.to_string()],
			None => vec![field.name().to_string()],
		}
	}
}

impl OverrideProcessor for TestBean {
	fn create_metadata(
		&self,
		field: &FieldDescriptor,
		declaring_class: &TestClass,
		context: &DiscoveryContext<'_>,
	) -> DiResult<OverrideMetadata> {
		let candidates = self.candidate_names(field);
		let factory = find_static_factory(context, declaring_class, &candidates, field.declared_type())?;

		tracing::trace!(
			field = %field.name(),
			factory = %factory.method.name(),
			owner = %factory.owner.name(),
			"resolved test bean factory"
		);

		let identity = format!("{}::{}", factory.owner.name(), factory.method.name());
		let invoker = Arc::clone(factory.invoker);
		let metadata = OverrideMetadata::new(
			field,
			declaring_class,
			identity,
			Arc::new(move |_: Option<ComponentInstance>| Ok(invoker())),
		);
		Ok(metadata
			.with_component_name(self.name.clone().filter(|name| !name.is_empty()))
			.with_strategy(OverrideStrategy::ReplaceDefinition))
	}
}

/// A qualifying factory and the class declaring it.
struct StaticFactory<'a> {
	owner: &'a TestClass,
	method: &'a FactoryMethod,
	invoker: &'a StaticInvoker,
}

/// Classes searched for a factory, nearest first: the declaring class and its
/// parents, then each visible enclosing class and its parents.
fn search_order<'a>(context: &DiscoveryContext<'_>, declaring_class: &'a TestClass) -> Vec<&'a TestClass> {
	let mut order: Vec<&'a TestClass> = Vec::new();
	let mut level = Some(declaring_class);
	while let Some(class) = level {
		let mut lineage = Some(class);
		while let Some(current) = lineage {
			if !order.iter().any(|seen| std::ptr::eq(*seen, current)) {
				order.push(current);
			}
			lineage = current.parent();
		}
		level = context.visible_enclosing(class);
	}
	order
}

fn find_static_factory<'a>(
	context: &DiscoveryContext<'_>,
	declaring_class: &'a TestClass,
	candidates: &[String],
	return_type: TypeKey,
) -> DiResult<StaticFactory<'a>> {
	let wanted: HashSet<&str> = candidates.iter().map(String::as_str).collect();

	for class in search_order(context, declaring_class) {
		let mut matches: Vec<StaticFactory<'a>> = class
			.methods()
			.iter()
			.filter(|method| {
				wanted.contains(method.name())
					&& method.parameter_count() == 0
					&& method.return_type() == return_type
			})
			.filter_map(|method| {
				method.static_invoker().map(|invoker| StaticFactory {
					owner: class,
					method,
					invoker,
				})
			})
			.collect();

		match matches.len() {
			0 => continue,
			1 => return Ok(matches.remove(0)),
			count => {
				return Err(DiError::InvalidOverrideConfiguration(format!(
					"Found {} competing static test bean factory methods in {} with return type {} \
					 whose name matches one of the supported candidates {:?}",
					count,
					class.name(),
					return_type,
					candidates
				)));
			}
		}
	}

	Err(DiError::InvalidOverrideConfiguration(format!(
		"Failed to find a static test bean factory method in {} with return type {} \
		 whose name matches one of the supported candidates {:?}",
		declaring_class.name(),
		return_type,
		candidates
	)))
}
