//! # Reinhardt Overrides
//!
//! Declarative component overrides for Reinhardt test contexts.
//!
//! A test describes itself as a [`test::TestClass`]: the fields it declares, the
//! override markers on those fields and the static factories that produce the
//! replacement values. Discovery walks the class, its parents and its enclosing
//! classes, and yields a customizer that swaps the targeted components in the
//! test's [`di::ComponentRegistry`].
//!
//! ## Feature Flags
//!
//! - `di` - Component registry
//! - `test` - Override discovery and context customization (implies `di`)
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_overrides::di::ComponentRegistry;
//! use reinhardt_overrides::test::{
//!     FieldDescriptor, OverrideContextCustomizerFactory, TestBean, TestClass,
//! };
//!
//! let test_class = TestClass::builder("DescriptorTests")
//!     .field(FieldDescriptor::new::<String>("descriptor").with_marker(TestBean::new()))
//!     .static_method("descriptor", || "Overridden descriptor".to_string())
//!     .build();
//!
//! let registry = ComponentRegistry::new();
//! registry.register_value("descriptor", "Production descriptor".to_string());
//!
//! if let Some(customizer) = OverrideContextCustomizerFactory::new()
//!     .create_context_customizer(&test_class, &[])
//!     .unwrap()
//! {
//!     customizer.customize_context(&registry).unwrap();
//! }
//!
//! assert_eq!(*registry.get_by_type::<String>().unwrap(), "Overridden descriptor");
//! ```

#[cfg(feature = "di")]
pub mod di;

// Re-export the most common entry points
#[cfg(feature = "di")]
pub use reinhardt_di::{ComponentDefinition, ComponentRegistry, DiError, DiResult, TypeKey};

#[cfg(feature = "test")]
pub use reinhardt_test::{
	OverrideContextCustomizer, OverrideContextCustomizerFactory, OverrideStrategy, TestBean,
	TestClass,
};
