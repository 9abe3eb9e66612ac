// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for property container operations.
//!
//! This module defines the error type shared by schema construction and
//! container access. All errors use `thiserror` for proper error handling
//! and conversion.

use thiserror::Error;

/// The error type for property container operations.
///
/// Attribute-style access and item-style access report distinct variants
/// for the same underlying condition, so code written against field-like
/// idioms and code written against map-like idioms each get the error
/// shape they expect. It is marked as `#[non_exhaustive]` to allow for
/// future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use slotbox::error::PropError;
///
/// fn read_property() -> Result<String, PropError> {
///     Err(PropError::UnknownKey {
///         name: "hostname".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropError {
    /// Attribute-form access to a name outside the allowed-key set.
    #[error("no such attribute: {name}")]
    UnknownAttr {
        /// The name that is not declared by the schema
        name: String,
    },

    /// Item-form access to a name outside the allowed-key set.
    #[error("no such key: {name}")]
    UnknownKey {
        /// The name that is not declared by the schema
        name: String,
    },

    /// Attribute-form assignment to a name outside the allowed-key set.
    #[error("attribute not settable: {name}")]
    AttrNotSettable {
        /// The name that is not declared by the schema
        name: String,
    },

    /// Item-form assignment to a name outside the allowed-key set.
    #[error("key not settable: {name}")]
    KeyNotSettable {
        /// The name that is not declared by the schema
        name: String,
    },

    /// Attribute-form access to a declared property that holds no value.
    #[error("attribute not set: {name}")]
    UnsetAttr {
        /// The declared but currently unset property name
        name: String,
    },

    /// Item-form access to a declared property that holds no value.
    #[error("key not set: {name}")]
    UnsetKey {
        /// The declared but currently unset property name
        name: String,
    },

    /// Building a schema without declaring any property names.
    ///
    /// A schema with no keys is a template, not an instantiable variant.
    #[error("a property schema must declare at least one property name")]
    EmptySchema,

    /// Binding an accessor to a property name the schema does not declare.
    #[error("accessor bound to undeclared property: {name}")]
    UndeclaredAccessor {
        /// The undeclared name the accessor targeted
        name: String,
    },
}

/// A specialized Result type for property container operations.
pub type Result<T> = std::result::Result<T, PropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attr_display() {
        let error = PropError::UnknownAttr {
            name: "foo".to_string(),
        };
        assert_eq!(error.to_string(), "no such attribute: foo");
    }

    #[test]
    fn test_unknown_key_display() {
        let error = PropError::UnknownKey {
            name: "foo".to_string(),
        };
        assert_eq!(error.to_string(), "no such key: foo");
    }

    #[test]
    fn test_not_settable_display() {
        let error = PropError::AttrNotSettable {
            name: "bar".to_string(),
        };
        assert_eq!(error.to_string(), "attribute not settable: bar");

        let error = PropError::KeyNotSettable {
            name: "bar".to_string(),
        };
        assert_eq!(error.to_string(), "key not settable: bar");
    }

    #[test]
    fn test_unset_display() {
        let error = PropError::UnsetAttr {
            name: "foo".to_string(),
        };
        assert_eq!(error.to_string(), "attribute not set: foo");

        let error = PropError::UnsetKey {
            name: "foo".to_string(),
        };
        assert_eq!(error.to_string(), "key not set: foo");
    }

    #[test]
    fn test_empty_schema_display() {
        assert_eq!(
            PropError::EmptySchema.to_string(),
            "a property schema must declare at least one property name"
        );
    }

    #[test]
    fn test_undeclared_accessor_display() {
        let error = PropError::UndeclaredAccessor {
            name: "baz".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "accessor bound to undeclared property: baz"
        );
    }
}
