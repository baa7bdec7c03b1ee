//! Unit tests for reinhardt-di crate components
//!
//! This module contains unit tests for individual components of the DI system.
//! Each test file focuses on a single component's behavior and edge cases.

pub mod definition_tests;
pub mod registry_tests;
