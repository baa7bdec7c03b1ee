//! Unit tests for ComponentDefinition

use reinhardt_di::{ComponentDefinition, ComponentInstance, TypeKey};
use rstest::*;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct MailSender {
	host: String,
}

#[rstest]
fn new_definition_records_produced_type() {
	// Act
	let definition = ComponentDefinition::new(|| MailSender {
		host: "smtp.local".to_string(),
	});

	// Assert
	assert_eq!(definition.type_key(), TypeKey::of::<MailSender>());
	assert!(definition.origin().is_none());
}

#[rstest]
fn from_value_yields_clones() {
	// Arrange
	let definition = ComponentDefinition::from_value(MailSender {
		host: "smtp.local".to_string(),
	});

	// Act
	let first = definition.instantiate("mail").unwrap();
	let second = definition.instantiate("mail").unwrap();

	// Assert
	assert!(!Arc::ptr_eq(&first, &second));
	assert_eq!(
		first.downcast_ref::<MailSender>(),
		second.downcast_ref::<MailSender>()
	);
}

#[rstest]
fn from_instance_shares_one_instance() {
	// Arrange
	let instance: ComponentInstance = Arc::new(7u32);
	let definition = ComponentDefinition::from_instance(TypeKey::of::<u32>(), Arc::clone(&instance));

	// Act
	let produced = definition.instantiate("seven").unwrap();

	// Assert
	assert!(Arc::ptr_eq(&produced, &instance));
}

#[rstest]
fn with_origin_is_reported() {
	let definition = ComponentDefinition::new(|| 1i64).with_origin("CounterTests.counter");
	assert_eq!(definition.origin(), Some("CounterTests.counter"));
}
