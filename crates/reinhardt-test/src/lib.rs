//! # Reinhardt Test
//!
//! Testing utilities for the Reinhardt framework.
//!
//! ## Overview
//!
//! This crate lets a test replace components of the application's
//! [`ComponentRegistry`](reinhardt_di::ComponentRegistry) with values produced by
//! factory functions the test declares. Tests describe themselves with a
//! [`TestClass`]: fields carrying override markers, static factories, and the
//! enclosing or parent classes they build on.
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_di::ComponentRegistry;
//! use reinhardt_test::{
//!     FieldDescriptor, OverrideContextCustomizerFactory, TestBean, TestClass,
//! };
//!
//! let outer = TestClass::builder("CounterTests")
//!     .field(FieldDescriptor::new::<String>("name").with_marker(TestBean::new()))
//!     .static_method("name", || "Overridden name".to_string())
//!     .build();
//!
//! // Nested tests see the overrides of their enclosing class
//! let nested = TestClass::builder("WhenCounting")
//!     .enclosing(outer)
//!     .field(
//!         FieldDescriptor::new::<i32>("counter")
//!             .with_marker(TestBean::new().with_name("counterBean")),
//!     )
//!     .static_method("counter", || 42i32)
//!     .build();
//!
//! let registry = ComponentRegistry::new();
//! registry.register_value("name", "Production name".to_string());
//! registry.register_value("counterBean", 0i32);
//!
//! OverrideContextCustomizerFactory::new()
//!     .create_context_customizer(&nested, &[])
//!     .unwrap()
//!     .unwrap()
//!     .customize_context(&registry)
//!     .unwrap();
//!
//! assert_eq!(*registry.get::<i32>("counterBean").unwrap(), 42);
//! assert_eq!(*registry.get_by_type::<String>().unwrap(), "Overridden name");
//! ```
//!
//! ## Modules
//!
//! - [`overrides`]: Override markers, discovery and context customization
//! - [`settings`]: Discovery settings from TOML or the environment
//! - [`logging`]: Test logging initialization

pub mod logging;
pub mod overrides;
pub mod settings;

pub use logging::init_test_logging;
pub use overrides::{
	ContextConfigurationAttributes, DiscoveryContext, FactoryMethod, FieldDescriptor, OverrideContextCustomizer,
	OverrideContextCustomizerFactory, OverrideMetadata, OverrideProcessor, OverrideStrategy,
	TestBean, TestClass,
};
pub use settings::{EnclosingConfiguration, OverrideSettings};
