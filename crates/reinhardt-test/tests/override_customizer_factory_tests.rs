//! Tests for OverrideContextCustomizerFactory
//!
//! These tests verify that:
//! 1. Test classes without override markers produce no customizer at all
//! 2. Markers are collected from the class, its enclosing classes and its parents
//! 3. Invalid markers abort discovery with a descriptive error
//! 4. Discovery is repeatable

use reinhardt_di::{DiError, TypeKey};
use reinhardt_test::init_test_logging;
use reinhardt_test::overrides::{
	ContextConfigurationAttributes, FieldDescriptor, OverrideContextCustomizer,
	OverrideContextCustomizerFactory, OverrideMetadata, OverrideStrategy, TestBean, TestClass,
};
use reinhardt_test::settings::{EnclosingConfiguration, OverrideSettings};
use rstest::*;
use std::sync::Arc;

// ============= Test classes =============

/// A single by-type override of `String`.
fn test1() -> Arc<TestClass> {
	TestClass::builder("Test1")
		.field(
			FieldDescriptor::new::<String>("descriptor")
				.with_marker(TestBean::new().with_method_name("descriptor")),
		)
		.static_method("descriptor", || "Overridden descriptor".to_string())
		.build()
}

/// Enclosing class declaring a by-type override of `String`.
fn test2() -> Arc<TestClass> {
	TestClass::builder("Test2")
		.field(
			FieldDescriptor::new::<String>("name")
				.with_marker(TestBean::new().with_method_name("name")),
		)
		.static_method("name", || "Overridden name".to_string())
		.build()
}

/// Nested in Test2, declares nothing itself.
fn orange() -> Arc<TestClass> {
	TestClass::builder("Orange").enclosing(test2()).build()
}

/// Nested in Test2, adds a named override of `i32`.
fn green() -> Arc<TestClass> {
	TestClass::builder("Green")
		.enclosing(test2())
		.field(
			FieldDescriptor::new::<i32>("counter").with_marker(
				TestBean::new()
					.with_name("counterBean")
					.with_method_name("counter"),
			),
		)
		.static_method("counter", || 42i32)
		.build()
}

/// The named factory exists but is not static.
fn invalid_test_missing_method() -> Arc<TestClass> {
	TestClass::builder("InvalidTestMissingMethod")
		.field(
			FieldDescriptor::new::<String>("descriptor")
				.with_marker(TestBean::new().with_method_name("descriptor")),
		)
		.instance_method::<String>("descriptor")
		.build()
}

// ============= Helpers =============

#[fixture]
fn factory() -> OverrideContextCustomizerFactory {
	init_test_logging();
	OverrideContextCustomizerFactory::new()
}

fn create_context_customizer(
	factory: &OverrideContextCustomizerFactory,
	test_class: &TestClass,
) -> Option<OverrideContextCustomizer> {
	factory
		.create_context_customizer(test_class, &[])
		.expect("discovery should succeed")
}

fn matches_test_bean(metadata: &OverrideMetadata, name: Option<&str>, component_type: TypeKey) -> bool {
	metadata.component_name() == name
		&& metadata.component_type() == component_type
		&& metadata.strategy() == OverrideStrategy::ReplaceDefinition
}

// ============= Discovery =============

#[rstest]
fn create_context_customizer_when_test_has_no_override(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let test_class = TestClass::builder("String").build();

	// Act
	let customizer = create_context_customizer(&factory, &test_class);

	// Assert
	assert!(customizer.is_none());
}

#[rstest]
fn create_context_customizer_when_test_has_single_override(
	factory: OverrideContextCustomizerFactory,
) {
	// Act
	let customizer = create_context_customizer(&factory, &test1()).unwrap();

	// Assert
	let metadata = customizer.metadata();
	assert_eq!(metadata.len(), 1);
	assert!(matches_test_bean(&metadata[0], None, TypeKey::of::<String>()));
}

#[rstest]
fn create_context_customizer_when_nested_test_has_single_override_in_parent(
	factory: OverrideContextCustomizerFactory,
) {
	// Act
	let customizer = create_context_customizer(&factory, &orange()).unwrap();

	// Assert
	let metadata = customizer.metadata();
	assert_eq!(metadata.len(), 1);
	assert!(matches_test_bean(&metadata[0], None, TypeKey::of::<String>()));

	// Same result as asking the enclosing class directly
	let enclosing = create_context_customizer(&factory, &test2()).unwrap();
	assert_eq!(customizer, enclosing);
}

#[rstest]
fn create_context_customizer_when_nested_test_has_override_as_well_as_the_parent(
	factory: OverrideContextCustomizerFactory,
) {
	// Act
	let customizer = create_context_customizer(&factory, &green()).unwrap();

	// Assert
	let metadata = customizer.metadata();
	assert_eq!(metadata.len(), 2);
	assert!(
		metadata
			.iter()
			.any(|m| matches_test_bean(m, None, TypeKey::of::<String>()))
	);
	assert!(
		metadata
			.iter()
			.any(|m| matches_test_bean(m, Some("counterBean"), TypeKey::of::<i32>()))
	);
}

#[rstest]
fn create_context_customizer_when_test_has_invalid_test_bean_target_method(
	factory: OverrideContextCustomizerFactory,
) {
	// Act
	let result = factory.create_context_customizer(&invalid_test_missing_method(), &[]);

	// Assert
	match result {
		Err(DiError::InvalidOverrideConfiguration(message)) => {
			assert!(message.contains("Failed to find a static test bean factory method"));
		}
		other => panic!("expected invalid configuration, got {:?}", other),
	}
}

#[rstest]
fn create_context_customizer_is_idempotent(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let test_class = green();

	// Act
	let first = create_context_customizer(&factory, &test_class).unwrap();
	let second = create_context_customizer(&factory, &test_class).unwrap();

	// Assert
	assert_eq!(first, second);
	assert_eq!(first.metadata(), second.metadata());
}

#[rstest]
fn configuration_attributes_do_not_affect_discovery(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let configurations = vec![
		ContextConfigurationAttributes::new("Test1").with_location("config/test.toml"),
	];

	// Act
	let with_configurations = factory
		.create_context_customizer(&test1(), &configurations)
		.unwrap();
	let without = factory.create_context_customizer(&test1(), &[]).unwrap();

	// Assert
	assert_eq!(with_configurations, without);
}

// ============= Hierarchy =============

#[rstest]
fn enclosing_overrides_come_first(factory: OverrideContextCustomizerFactory) {
	// Act
	let customizer = create_context_customizer(&factory, &green()).unwrap();

	// Assert
	let origins: Vec<String> = customizer.metadata().iter().map(|m| m.origin()).collect();
	assert_eq!(origins, vec!["Test2.name".to_string(), "Green.counter".to_string()]);
}

#[rstest]
fn override_configuration_stops_enclosing_inheritance(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let isolated = TestClass::builder("Isolated")
		.enclosing(test2())
		.enclosing_configuration(EnclosingConfiguration::Override)
		.build();

	// Act
	let customizer = create_context_customizer(&factory, &isolated);

	// Assert
	assert!(customizer.is_none());
}

#[rstest]
fn override_configuration_hides_enclosing_factories(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let isolated = TestClass::builder("Isolated")
		.enclosing(test2())
		.enclosing_configuration(EnclosingConfiguration::Override)
		.field(FieldDescriptor::new::<String>("name").with_marker(TestBean::new()))
		.build();

	// Act
	let result = factory.create_context_customizer(&isolated, &[]);

	// Assert
	match result {
		Err(DiError::InvalidOverrideConfiguration(message)) => {
			assert!(message.contains("Failed to find a static test bean factory method in Isolated"));
		}
		other => panic!("expected invalid configuration, got {:?}", other),
	}
}

#[rstest]
fn settings_default_hides_enclosing_factories() {
	// Arrange
	let factory = OverrideContextCustomizerFactory::with_settings(
		OverrideSettings::new().with_enclosing_configuration(EnclosingConfiguration::Override),
	);
	let nested = TestClass::builder("NestedWithoutFactory")
		.enclosing(test2())
		.field(FieldDescriptor::new::<String>("name").with_marker(TestBean::new()))
		.build();

	// Act
	let result = factory.create_context_customizer(&nested, &[]);

	// Assert
	assert!(matches!(result, Err(DiError::InvalidOverrideConfiguration(_))));
}

#[rstest]
fn nested_marker_uses_enclosing_factory_when_inheriting(
	factory: OverrideContextCustomizerFactory,
) {
	// Arrange
	let nested = TestClass::builder("Borrowing")
		.enclosing(test2())
		.field(
			FieldDescriptor::new::<String>("alias")
				.with_marker(TestBean::new().with_name("alias").with_method_name("name")),
		)
		.build();

	// Act
	let customizer = create_context_customizer(&factory, &nested).unwrap();

	// Assert
	let metadata = customizer.metadata();
	assert_eq!(metadata.len(), 2);
	assert_eq!(metadata[1].factory_identity(), "Test2::name");
}

#[rstest]
fn enclosing_configuration_is_inherited_by_deeper_nesting(
	factory: OverrideContextCustomizerFactory,
) {
	// Arrange
	let middle = TestClass::builder("Middle")
		.enclosing(test2())
		.enclosing_configuration(EnclosingConfiguration::Override)
		.build();
	let innermost = TestClass::builder("Innermost").enclosing(middle).build();

	// Act
	let customizer = create_context_customizer(&factory, &innermost);

	// Assert
	assert!(customizer.is_none());
}

#[rstest]
fn settings_default_applies_to_classes_without_configuration() {
	// Arrange
	let factory = OverrideContextCustomizerFactory::with_settings(
		OverrideSettings::new().with_enclosing_configuration(EnclosingConfiguration::Override),
	);

	// Act
	let orange_customizer = factory.create_context_customizer(&orange(), &[]).unwrap();
	let green_customizer = factory.create_context_customizer(&green(), &[]).unwrap().unwrap();

	// Assert
	assert!(orange_customizer.is_none());
	assert_eq!(green_customizer.metadata().len(), 1);
	assert_eq!(green_customizer.metadata()[0].component_name(), Some("counterBean"));
}

#[rstest]
fn parent_class_overrides_are_inherited(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let child = TestClass::builder("ChildOfTest1")
		.parent(test1())
		.field(
			FieldDescriptor::new::<u64>("timeout").with_marker(TestBean::new()),
		)
		.static_method("timeout", || 30u64)
		.build();

	// Act
	let customizer = create_context_customizer(&factory, &child).unwrap();

	// Assert
	let metadata = customizer.metadata();
	assert_eq!(metadata.len(), 2);
	assert_eq!(metadata[0].origin(), "Test1.descriptor");
	assert_eq!(metadata[1].origin(), "ChildOfTest1.timeout");
	assert_eq!(metadata[1].factory_identity(), "ChildOfTest1::timeout");
}

#[rstest]
fn class_reachable_twice_is_scanned_once(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let outer = test2();
	let nested = TestClass::builder("NestedSubclass")
		.enclosing(Arc::clone(&outer))
		.parent(outer)
		.build();

	// Act
	let customizer = create_context_customizer(&factory, &nested).unwrap();

	// Assert
	assert_eq!(customizer.metadata().len(), 1);
}

// ============= Invalid configurations =============

#[rstest]
fn duplicate_override_fails(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let test_class = TestClass::builder("DuplicateTests")
		.field(
			FieldDescriptor::new::<String>("first")
				.with_marker(TestBean::new().with_method_name("shared")),
		)
		.field(
			FieldDescriptor::new::<String>("second")
				.with_marker(TestBean::new().with_method_name("shared")),
		)
		.static_method("shared", || "shared".to_string())
		.build();

	// Act
	let result = factory.create_context_customizer(&test_class, &[]);

	// Assert
	let message = result.unwrap_err().to_string();
	assert!(message.contains("Duplicate component override discovered in test class DuplicateTests"));
}

#[rstest]
fn invalid_marker_fails_whole_discovery(factory: OverrideContextCustomizerFactory) {
	// Arrange
	let test_class = TestClass::builder("MixedTests")
		.field(FieldDescriptor::new::<String>("valid").with_marker(TestBean::new()))
		.static_method("valid", || "valid".to_string())
		.field(FieldDescriptor::new::<i32>("missing").with_marker(TestBean::new()))
		.build();

	// Act
	let result = factory.create_context_customizer(&test_class, &[]);

	// Assert
	assert!(matches!(result, Err(DiError::InvalidOverrideConfiguration(_))));
}

#[rstest]
fn invalid_marker_on_enclosing_class_fails_nested_discovery(
	factory: OverrideContextCustomizerFactory,
) {
	// Arrange
	let nested = TestClass::builder("NestedInInvalid")
		.enclosing(invalid_test_missing_method())
		.build();

	// Act
	let result = factory.create_context_customizer(&nested, &[]);

	// Assert
	let message = result.unwrap_err().to_string();
	assert!(message.contains("Failed to find a static test bean factory method in InvalidTestMissingMethod"));
}
