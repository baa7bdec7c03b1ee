//! Declarative component overrides for test contexts
//!
//! A test class lists fields carrying override markers such as [`TestBean`].
//! [`OverrideContextCustomizerFactory`] collects those markers across the class,
//! its parents and its enclosing classes, and produces an
//! [`OverrideContextCustomizer`] that swaps the targeted components in the test's
//! [`ComponentRegistry`](reinhardt_di::ComponentRegistry).
//!
//! ```rust
//! use reinhardt_di::ComponentRegistry;
//! use reinhardt_test::overrides::{
//!     FieldDescriptor, OverrideContextCustomizerFactory, TestBean, TestClass,
//! };
//!
//! let test_class = TestClass::builder("GreetingTests")
//!     .field(FieldDescriptor::new::<String>("greeting").with_marker(TestBean::new()))
//!     .static_method("greeting", || "hello from the test".to_string())
//!     .build();
//!
//! let registry = ComponentRegistry::new();
//! registry.register_value("greeting", "hello".to_string());
//!
//! let customizer = OverrideContextCustomizerFactory::new()
//!     .create_context_customizer(&test_class, &[])
//!     .unwrap()
//!     .expect("GreetingTests declares an override");
//! customizer.customize_context(&registry).unwrap();
//!
//! assert_eq!(*registry.get::<String>("greeting").unwrap(), "hello from the test");
//! ```

pub mod customizer;
pub mod factory;
pub mod metadata;
pub mod processor;
pub mod test_bean;
pub mod test_class;

pub use customizer::OverrideContextCustomizer;
pub use factory::{ContextConfigurationAttributes, OverrideContextCustomizerFactory};
pub use metadata::{OverrideFactory, OverrideMetadata, OverrideStrategy};
pub use processor::{DiscoveryContext, OverrideProcessor};
pub use test_bean::TestBean;
pub use test_class::{FactoryMethod, FieldDescriptor, MethodKind, StaticInvoker, TestClass, TestClassBuilder};
