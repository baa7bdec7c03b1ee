//! Dependency injection module.
//!
//! This module provides the component registry that test overrides act on.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "di")]
//! use reinhardt_overrides::di::{ComponentDefinition, ComponentRegistry};
//! ```

#[cfg(feature = "di")]
pub use reinhardt_di::*;
