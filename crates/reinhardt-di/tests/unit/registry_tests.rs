//! Unit tests for ComponentRegistry

use reinhardt_di::{ComponentDefinition, ComponentRegistry, DiError, TypeKey};
use rstest::*;
use std::sync::{Arc, Weak};

#[fixture]
fn registry() -> ComponentRegistry {
	let registry = ComponentRegistry::new();
	registry.register_value("greeting", "hello".to_string());
	registry.register_value("port", 8080u16);
	registry
}

#[rstest]
fn component_registry_new_empty() {
	// Act
	let registry = ComponentRegistry::new();

	// Assert
	assert!(registry.is_empty());
	assert_eq!(registry.len(), 0);
}

#[rstest]
fn get_resolves_by_name(registry: ComponentRegistry) {
	// Act
	let greeting = registry.get::<String>("greeting").unwrap();

	// Assert
	assert_eq!(*greeting, "hello");
	assert_eq!(registry.len(), 2);
}

#[rstest]
fn get_by_type_resolves_unique_definition(registry: ComponentRegistry) {
	// Act
	let port = registry.get_by_type::<u16>().unwrap();

	// Assert
	assert_eq!(*port, 8080);
}

#[rstest]
fn get_by_type_fails_when_ambiguous(registry: ComponentRegistry) {
	// Arrange
	registry.register_value("farewell", "bye".to_string());

	// Act
	let result = registry.get_by_type::<String>();

	// Assert
	match result {
		Err(DiError::AmbiguousComponent { candidates, .. }) => {
			assert_eq!(candidates, vec!["greeting".to_string(), "farewell".to_string()]);
		}
		other => panic!("expected ambiguity error, got {:?}", other.map(|_| ())),
	}
}

#[rstest]
fn get_by_type_fails_when_missing(registry: ComponentRegistry) {
	let result = registry.get_by_type::<i64>();
	assert!(matches!(result, Err(DiError::NotFound(_))));
}

#[rstest]
fn get_with_wrong_type_reports_mismatch(registry: ComponentRegistry) {
	// Act
	let result = registry.get::<u32>("port");

	// Assert
	match result {
		Err(DiError::TypeMismatch { name, expected, actual }) => {
			assert_eq!(name, "port");
			assert_eq!(expected, "u32");
			assert_eq!(actual, "u16");
		}
		other => panic!("expected type mismatch, got {:?}", other.map(|_| ())),
	}
}

#[rstest]
fn replace_missing_definition_fails(registry: ComponentRegistry) {
	// Act
	let result = registry.replace("missing", ComponentDefinition::new(|| 1u8));

	// Assert
	assert!(matches!(result, Err(DiError::NotFound(_))));
	assert!(!registry.contains("missing"));
}

#[rstest]
fn register_returns_previous_definition(registry: ComponentRegistry) {
	// Act
	let previous = registry.register_value("port", 9090u16);

	// Assert
	assert_eq!(previous.map(|d| d.type_key()), Some(TypeKey::of::<u16>()));
	assert_eq!(*registry.get::<u16>("port").unwrap(), 9090);
}

#[rstest]
fn names_for_type_follow_registration_order(registry: ComponentRegistry) {
	// Arrange
	registry.register_value("banner", "welcome".to_string());

	// Act
	let names = registry.names_for_type(&TypeKey::of::<String>());

	// Assert
	assert_eq!(names, vec!["greeting".to_string(), "banner".to_string()]);
	assert_eq!(
		registry.names(),
		vec!["greeting".to_string(), "port".to_string(), "banner".to_string()]
	);
}

#[rstest]
fn replace_during_instantiation_discards_stale_instance() {
	// Arrange
	let registry = Arc::new(ComponentRegistry::new());
	let handle: Weak<ComponentRegistry> = Arc::downgrade(&registry);
	registry.register(
		"name",
		ComponentDefinition::new(move || {
			if let Some(registry) = handle.upgrade() {
				registry
					.replace("name", ComponentDefinition::from_value("replaced".to_string()))
					.unwrap();
			}
			"stale".to_string()
		}),
	);

	// Act
	let first = registry.get::<String>("name").unwrap();
	let second = registry.get::<String>("name").unwrap();

	// Assert
	assert_eq!(*first, "replaced");
	assert_eq!(*second, "replaced");
}
