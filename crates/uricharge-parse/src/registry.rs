//! Known entities and directives.

use std::collections::{BTreeMap, BTreeSet};

use crate::Scalar;

/// Entities decoding to scalars, and names parsed as directives.
///
/// `!NaN`, `!Infinity` and `!-Infinity` are always recognized as numbers.
/// Any other `!…` token is an opaque entity unless registered here.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: BTreeMap<String, Scalar>,
    directives: BTreeSet<String>,
}

/// The registry used by [`Parser::new`](crate::Parser::new).
pub static DEFAULT_REGISTRY: Registry = Registry::new();

impl Registry {
    /// A registry knowing only the built-in entities.
    pub const fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            directives: BTreeSet::new(),
        }
    }

    /// Decode the entity `raw` (leading `!` included) to `value`.
    pub fn with_entity(mut self, raw: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.entities.insert(raw.into(), value.into());
        self
    }

    /// Parse `!name(…)` as a directive with arguments.
    pub fn with_directive(mut self, name: impl Into<String>) -> Self {
        self.directives.insert(name.into());
        self
    }

    /// Look up the scalar an entity decodes to.
    pub fn entity(&self, raw: &str) -> Option<Scalar> {
        if let Some(value) = self.entities.get(raw) {
            return Some(value.clone());
        }
        match raw {
            "!NaN" => Some(Scalar::Number(f64::NAN)),
            "!Infinity" => Some(Scalar::Number(f64::INFINITY)),
            "!-Infinity" => Some(Scalar::Number(f64::NEG_INFINITY)),
            _ => None,
        }
    }

    /// Whether `name` (without the `!`) is a directive.
    pub fn is_directive(&self, name: &str) -> bool {
        self.directives.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_builtin_entities() {
        let registry = &DEFAULT_REGISTRY;
        assert!(matches!(registry.entity("!NaN"), Some(Scalar::Number(n)) if n.is_nan()));
        assert_eq!(
            registry.entity("!Infinity"),
            Some(Scalar::Number(f64::INFINITY))
        );
        assert_eq!(
            registry.entity("!-Infinity"),
            Some(Scalar::Number(f64::NEG_INFINITY))
        );
        assert_eq!(registry.entity("!nan"), None);
        assert!(!registry.is_directive("NaN"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = Registry::new()
            .with_entity("!answer", 42.0)
            .with_entity("!NaN", "not a number")
            .with_directive("ref");
        assert_eq!(registry.entity("!answer"), Some(Scalar::Number(42.0)));
        assert_eq!(registry.entity("!NaN"), Some(Scalar::from("not a number")));
        assert_eq!(
            registry.entity("!Infinity"),
            Some(Scalar::Number(f64::INFINITY))
        );
        assert!(registry.is_directive("ref"));
        assert!(!registry.is_directive("!ref"));
    }
}
