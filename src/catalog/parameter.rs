//! Parameter value type
//!
//! This module defines the named configuration value stored in the catalog.

use serde::{Deserialize, Serialize};

/// A named, opaque configuration value
///
/// Parameters are plain owned data. Every component boundary hands out a
/// clone, so a caller mutating a returned instance cannot touch catalog
/// state. Two parameters are equal iff key and value are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Identifying key, unique within the catalog (e.g., "conjunto.max.limit")
    pub key: String,
    /// Opaque value, may be empty
    pub value: String,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        assert_eq!(Parameter::new("a", "1"), Parameter::new("a", "1"));
        assert_ne!(Parameter::new("a", "1"), Parameter::new("a", "2"));
        assert_ne!(Parameter::new("a", "1"), Parameter::new("b", "1"));
    }

    #[test]
    fn test_json_shape() {
        let parameter = Parameter::new("gestion.conjunto.listado.limite", "50");
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "gestion.conjunto.listado.limite", "value": "50"})
        );

        let back: Parameter = serde_json::from_value(json).unwrap();
        assert_eq!(back, parameter);
    }
}
