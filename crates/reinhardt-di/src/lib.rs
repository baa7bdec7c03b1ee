//! # Reinhardt Dependency Injection
//!
//! Component container used by Reinhardt applications and their test contexts.
//!
//! ## Features
//!
//! - **Named components**: Definitions are registered under a name and resolved by
//!   name or, when unique, by type
//! - **Lazy singletons**: Instances are created on first resolution and cached
//! - **Replaceable**: Definitions can be swapped before resolution, which is what
//!   test overrides build on
//! - **Type-checked**: Resolution verifies the produced instance against the
//!   declared [`TypeKey`]
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_di::{ComponentDefinition, ComponentRegistry};
//!
//! let registry = ComponentRegistry::new();
//! registry.register("port", ComponentDefinition::new(|| 8080u16));
//!
//! // Resolve by type when only one definition produces `u16`
//! let port = registry.get_by_type::<u16>().unwrap();
//! assert_eq!(*port, 8080);
//!
//! // Swap the definition before anything else resolves it
//! registry
//!     .replace("port", ComponentDefinition::new(|| 0u16))
//!     .unwrap();
//! assert_eq!(*registry.get::<u16>("port").unwrap(), 0);
//! ```

pub mod error;
pub mod registry;
pub mod type_key;

pub use error::{DiError, DiResult};
pub use registry::{ComponentDefinition, ComponentFactory, ComponentInstance, ComponentRegistry};
pub use type_key::TypeKey;
