//! Runtime type identity for registered components

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a component type at runtime.
///
/// Two keys are equal when their [`TypeId`]s are equal; the type name is only
/// carried for diagnostics.
///
/// # Examples
///
/// ```
/// use reinhardt_di::TypeKey;
///
/// let key = TypeKey::of::<String>();
/// assert_eq!(key, TypeKey::of::<String>());
/// assert_ne!(key, TypeKey::of::<i32>());
/// assert_eq!(key.short_name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	pub fn of<T: Any + ?Sized>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Fully qualified type name, as reported by [`std::any::type_name`].
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Type name with every module path stripped, including those inside
	/// generic arguments, tuples and arrays.
	///
	/// `(i32, alloc::string::String)` becomes `(i32, String)`.
	pub fn short_name(&self) -> String {
		let mut short = String::with_capacity(self.name.len());
		// Start of the path currently being written
		let mut path_start = 0;
		let mut chars = self.name.chars().peekable();
		while let Some(c) = chars.next() {
			if c == ':' && chars.peek() == Some(&':') {
				chars.next();
				short.truncate(path_start);
			} else if c.is_alphanumeric() || c == '_' {
				short.push(c);
			} else {
				short.push(c);
				path_start = short.len();
			}
		}
		short
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.short_name())
	}
}
