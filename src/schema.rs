// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete-variant declaration for property containers.
//!
//! This module provides `PropSchema`, the immutable description of a
//! container variant: its closed set of allowed property names, the key
//! policy, and per-key accessor bindings. A schema is built once with
//! `SchemaBuilder` and shared across instances via `Arc`, so accessor
//! dispatch is a table lookup rather than any runtime name synthesis.

use crate::container::RawProps;
use crate::error::{PropError, Result};
use crate::value::PropValue;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Custom getter: produces the property's value, with raw access to the
/// container's storage and extras.
pub type GetterFn = dyn Fn(&mut RawProps<'_>) -> Result<PropValue> + Send + Sync;

/// Custom setter: solely responsible for deciding whether/what to store.
pub type SetterFn = dyn Fn(&mut RawProps<'_>, PropValue) -> Result<()> + Send + Sync;

/// Custom deleter: solely responsible for removing the property (or not).
pub type DeleterFn = dyn Fn(&mut RawProps<'_>) -> Result<()> + Send + Sync;

/// Optional accessor bindings for one property name.
#[derive(Clone, Default)]
pub(crate) struct AccessorSet {
    pub(crate) getter: Option<Arc<GetterFn>>,
    pub(crate) setter: Option<Arc<SetterFn>>,
    pub(crate) deleter: Option<Arc<DeleterFn>>,
}

/// How a schema treats keys outside its allowed-key set at construction
/// time, and how it treats the no-value sentinel.
///
/// # Examples
///
/// ```
/// use slotbox::schema::{KeyPolicy, PropSchema};
///
/// let schema = PropSchema::builder().key("foo").lenient().build().unwrap();
/// assert_eq!(schema.policy(), KeyPolicy::Lenient);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Unknown keys supplied at construction are an error; reading a
    /// declared-but-unset property is an error.
    Strict,
    /// Unknown keys supplied at construction are silently dropped; setting
    /// `PropValue::Null` removes the property; reading a declared-but-unset
    /// property yields `PropValue::Null`.
    Lenient,
}

/// The immutable declaration of a container variant.
///
/// A schema fixes the allowed-key set, the key policy, and the accessor
/// bindings for a concrete variant. It is never mutated after `build()`;
/// instances of the variant share it via `Arc`. Building a schema with no
/// declared keys fails: such a schema would be a template, not an
/// instantiable variant.
///
/// # Examples
///
/// ```
/// use slotbox::schema::PropSchema;
///
/// let schema = PropSchema::builder().keys(["foo", "bar"]).build().unwrap();
/// assert!(schema.allows("foo"));
/// assert!(!schema.allows("baz"));
/// ```
pub struct PropSchema {
    keys: BTreeSet<String>,
    accessors: BTreeMap<String, AccessorSet>,
    policy: KeyPolicy,
}

impl PropSchema {
    /// Creates a new schema builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbox::schema::PropSchema;
    ///
    /// let schema = PropSchema::builder().key("foo").build().unwrap();
    /// assert_eq!(schema.allowed_keys().count(), 1);
    /// ```
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns `true` if `name` is in the allowed-key set.
    pub fn allows(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    /// Returns the key policy of this schema.
    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Returns `true` if this schema uses the lenient key policy.
    pub fn is_lenient(&self) -> bool {
        self.policy == KeyPolicy::Lenient
    }

    /// Iterates over the allowed property names in sorted order.
    ///
    /// This enumerates the declaration, not any instance's contents.
    pub fn allowed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub(crate) fn key_set(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub(crate) fn getter(&self, name: &str) -> Option<Arc<GetterFn>> {
        self.accessors.get(name).and_then(|a| a.getter.clone())
    }

    pub(crate) fn setter(&self, name: &str) -> Option<Arc<SetterFn>> {
        self.accessors.get(name).and_then(|a| a.setter.clone())
    }

    pub(crate) fn deleter(&self, name: &str) -> Option<Arc<DeleterFn>> {
        self.accessors.get(name).and_then(|a| a.deleter.clone())
    }
}

impl std::fmt::Debug for PropSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropSchema")
            .field("keys", &self.keys)
            .field("policy", &self.policy)
            .field("intercepted", &self.accessors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a `PropSchema`.
///
/// Declare the allowed keys, optionally bind accessors and select the
/// lenient policy, then call `build()`. Validation happens at `build()`
/// time so keys and accessors can be supplied in any order.
///
/// # Examples
///
/// ```
/// use slotbox::prelude::*;
///
/// let schema = PropSchema::builder()
///     .keys(["foo", "bar"])
///     .setter("foo", |raw, value| raw.raw_set("foo", value))
///     .build()
///     .unwrap();
/// assert!(schema.allows("bar"));
/// ```
pub struct SchemaBuilder {
    keys: BTreeSet<String>,
    accessors: BTreeMap<String, AccessorSet>,
    policy: KeyPolicy,
}

impl SchemaBuilder {
    /// Creates a new builder with no keys declared and the strict policy.
    pub fn new() -> Self {
        Self {
            keys: BTreeSet::new(),
            accessors: BTreeMap::new(),
            policy: KeyPolicy::Strict,
        }
    }

    /// Declares one allowed property name. Duplicates collapse.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.insert(name.into());
        self
    }

    /// Declares several allowed property names. Duplicates collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbox::schema::PropSchema;
    ///
    /// let schema = PropSchema::builder()
    ///     .keys(["foo", "bar", "foo"])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(schema.allowed_keys().count(), 2);
    /// ```
    pub fn keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(names.into_iter().map(Into::into));
        self
    }

    /// Binds a custom getter for `name`.
    ///
    /// The getter is invoked instead of any raw storage read; to reach the
    /// backing value it calls [`RawProps::raw_get`], which never re-enters
    /// accessor dispatch.
    pub fn getter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut RawProps<'_>) -> Result<PropValue> + Send + Sync + 'static,
    {
        self.accessors.entry(name.into()).or_default().getter = Some(Arc::new(f));
        self
    }

    /// Binds a custom setter for `name`.
    ///
    /// The setter is solely responsible for storing (or discarding) the
    /// incoming value, via [`RawProps::raw_set`].
    pub fn setter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut RawProps<'_>, PropValue) -> Result<()> + Send + Sync + 'static,
    {
        self.accessors.entry(name.into()).or_default().setter = Some(Arc::new(f));
        self
    }

    /// Binds a custom deleter for `name`.
    ///
    /// The deleter is solely responsible for removing the property (or
    /// choosing not to), via [`RawProps::raw_del`].
    pub fn deleter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut RawProps<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.accessors.entry(name.into()).or_default().deleter = Some(Arc::new(f));
        self
    }

    /// Selects the lenient key policy for this variant.
    pub fn lenient(mut self) -> Self {
        self.policy = KeyPolicy::Lenient;
        self
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Returns [`PropError::EmptySchema`] if no key was declared, and
    /// [`PropError::UndeclaredAccessor`] if an accessor was bound to a name
    /// outside the declared key set.
    pub fn build(self) -> Result<Arc<PropSchema>> {
        if self.keys.is_empty() {
            return Err(PropError::EmptySchema);
        }
        for name in self.accessors.keys() {
            if !self.keys.contains(name) {
                return Err(PropError::UndeclaredAccessor { name: name.clone() });
            }
        }
        Ok(Arc::new(PropSchema {
            keys: self.keys,
            accessors: self.accessors,
            policy: self.policy,
        }))
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schema_fails() {
        let result = PropSchema::builder().build();
        assert!(matches!(result, Err(PropError::EmptySchema)));
    }

    #[test]
    fn test_single_key() {
        let schema = PropSchema::builder().key("foo").build().unwrap();
        assert!(schema.allows("foo"));
        assert!(!schema.allows("bar"));
        assert_eq!(schema.policy(), KeyPolicy::Strict);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let schema = PropSchema::builder()
            .keys(["foo", "bar"])
            .key("foo")
            .build()
            .unwrap();
        assert_eq!(schema.allowed_keys().count(), 2);
    }

    #[test]
    fn test_allowed_keys_sorted() {
        let schema = PropSchema::builder()
            .keys(["zeta", "alpha"])
            .build()
            .unwrap();
        let names: Vec<&str> = schema.allowed_keys().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_lenient_policy() {
        let schema = PropSchema::builder().key("foo").lenient().build().unwrap();
        assert!(schema.is_lenient());
        assert_eq!(schema.policy(), KeyPolicy::Lenient);
    }

    #[test]
    fn test_undeclared_accessor_fails() {
        let result = PropSchema::builder()
            .key("foo")
            .getter("bar", |raw| raw.raw_get("bar"))
            .build();
        assert!(matches!(
            result,
            Err(PropError::UndeclaredAccessor { name }) if name == "bar"
        ));
    }

    #[test]
    fn test_accessor_lookup() {
        let schema = PropSchema::builder()
            .key("foo")
            .getter("foo", |raw| raw.raw_get("foo"))
            .build()
            .unwrap();
        assert!(schema.getter("foo").is_some());
        assert!(schema.setter("foo").is_none());
        assert!(schema.deleter("foo").is_none());
    }

    #[test]
    fn test_schema_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PropSchema>();
    }
}
