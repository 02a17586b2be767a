use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Event;

/// Routing identity of an event shape.
///
/// Equality and hashing use the [`TypeId`] only; the type name is kept for
/// logs and error messages.
#[derive(Clone, Copy)]
pub struct ShapeKey {
    id: TypeId,
    name: &'static str,
}

impl ShapeKey {
    /// Returns the key of shape `E`.
    #[must_use]
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// The [`TypeId`] of the shape.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name of the shape.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this key identifies shape `E`.
    #[inline]
    pub fn is<E: Event>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for ShapeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShapeKey {}

impl Hash for ShapeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeKey").field(&self.name).finish()
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Celsius(#[allow(dead_code)] f64);
    struct Fahrenheit(#[allow(dead_code)] f64);

    #[test]
    fn test_same_layout_distinct_shapes() {
        assert_ne!(ShapeKey::of::<Celsius>(), ShapeKey::of::<Fahrenheit>());
        assert_eq!(ShapeKey::of::<Celsius>(), ShapeKey::of::<Celsius>());
    }

    #[test]
    fn test_is_matches_only_own_type() {
        let key = ShapeKey::of::<Celsius>();
        assert!(key.is::<Celsius>());
        assert!(!key.is::<Fahrenheit>());
    }

    #[test]
    fn test_display_uses_type_name() {
        let key = ShapeKey::of::<u32>();
        assert_eq!(key.to_string(), "u32");
        assert_eq!(format!("{key:?}"), "ShapeKey(\"u32\")");
    }
}
