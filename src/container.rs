// SPDX-License-Identifier: MIT OR Apache-2.0

//! The property container.
//!
//! This module provides `PropContainer`, a value that behaves both as a
//! restricted key-value mapping and as an object with named properties.
//! Attribute-form and item-form access funnel through one private primitive
//! triple, so the two access styles are consistent by construction; the
//! form only selects which error kind is reported. Per-key custom
//! accessors declared on the schema intercept the normal paths, while the
//! raw primitives always operate directly on storage.

use crate::error::{PropError, Result};
use crate::schema::PropSchema;
use crate::value::PropValue;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Which access surface an operation came through.
///
/// The same underlying condition reports a different error variant per
/// form, mirroring field-like versus map-like caller expectations.
#[derive(Clone, Copy)]
enum Form {
    Attr,
    Item,
}

impl Form {
    fn unknown(self, name: &str) -> PropError {
        match self {
            Form::Attr => PropError::UnknownAttr { name: name.into() },
            Form::Item => PropError::UnknownKey { name: name.into() },
        }
    }

    fn not_settable(self, name: &str) -> PropError {
        match self {
            Form::Attr => PropError::AttrNotSettable { name: name.into() },
            Form::Item => PropError::KeyNotSettable { name: name.into() },
        }
    }

    fn unset(self, name: &str) -> PropError {
        match self {
            Form::Attr => PropError::UnsetAttr { name: name.into() },
            Form::Item => PropError::UnsetKey { name: name.into() },
        }
    }

    /// Restates a container error in this form, so errors forwarded out of
    /// accessor bodies (which use the key-form raw primitives) keep the
    /// shape the requesting surface promises. Other errors pass through.
    fn requalify(self, err: PropError) -> PropError {
        match (self, err) {
            (Form::Attr, PropError::UnknownKey { name }) => PropError::UnknownAttr { name },
            (Form::Attr, PropError::UnsetKey { name }) => PropError::UnsetAttr { name },
            (Form::Attr, PropError::KeyNotSettable { name }) => {
                PropError::AttrNotSettable { name }
            }
            (Form::Item, PropError::UnknownAttr { name }) => PropError::UnknownKey { name },
            (Form::Item, PropError::UnsetAttr { name }) => PropError::UnsetKey { name },
            (Form::Item, PropError::AttrNotSettable { name }) => {
                PropError::KeyNotSettable { name }
            }
            (_, err) => err,
        }
    }
}

/// Raw view of a container handed to custom accessors.
///
/// `RawProps` exposes only the raw storage primitives and the out-of-band
/// extras namespace. It carries no accessor table, so an accessor body
/// cannot re-enter interception: `raw_get`/`raw_set`/`raw_del` always
/// reflect the true backing storage.
///
/// # Examples
///
/// ```
/// use slotbox::prelude::*;
///
/// let schema = PropSchema::builder()
///     .key("foo")
///     .setter("foo", |raw, value| {
///         raw.set_extra("writes", PropValue::Bool(true));
///         raw.raw_set("foo", value)
///     })
///     .build()
///     .unwrap();
///
/// let mut can = PropContainer::new(schema);
/// can.set_item("foo", "bar").unwrap();
/// assert_eq!(can.extra("writes"), Some(&PropValue::Bool(true)));
/// ```
pub struct RawProps<'a> {
    keys: &'a BTreeSet<String>,
    storage: &'a mut BTreeMap<String, PropValue>,
    extras: &'a mut BTreeMap<String, PropValue>,
}

impl<'a> RawProps<'a> {
    /// Returns `true` if `name` is in the allowed-key set.
    pub fn allows(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    /// Reads the backing value for `name`, bypassing any custom getter.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownKey`] for an undeclared name,
    /// [`PropError::UnsetKey`] for a declared name with no stored value.
    pub fn raw_get(&self, name: &str) -> Result<PropValue> {
        if !self.keys.contains(name) {
            return Err(PropError::UnknownKey { name: name.into() });
        }
        self.storage
            .get(name)
            .cloned()
            .ok_or_else(|| PropError::UnsetKey { name: name.into() })
    }

    /// Stores `value` under `name` verbatim, bypassing any custom setter
    /// and the lenient no-value folding.
    ///
    /// # Errors
    ///
    /// [`PropError::KeyNotSettable`] for an undeclared name.
    pub fn raw_set(&mut self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        if !self.keys.contains(name) {
            return Err(PropError::KeyNotSettable { name: name.into() });
        }
        self.storage.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Removes `name` from storage, bypassing any custom deleter.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownKey`] for an undeclared name,
    /// [`PropError::UnsetKey`] if the property is not currently set.
    pub fn raw_del(&mut self, name: &str) -> Result<()> {
        if !self.keys.contains(name) {
            return Err(PropError::UnknownKey { name: name.into() });
        }
        if self.storage.remove(name).is_none() {
            return Err(PropError::UnsetKey { name: name.into() });
        }
        Ok(())
    }

    /// Returns `true` if `name` is currently set in storage.
    pub fn contains(&self, name: &str) -> bool {
        self.storage.contains_key(name)
    }

    /// Assigns an out-of-band attribute, outside the allowed-key set.
    ///
    /// Extras never appear in storage, length, enumeration, equality, or
    /// the string form; they are plain bookkeeping state for accessors.
    pub fn set_extra(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.extras.insert(name.into(), value.into());
    }

    /// Reads an out-of-band attribute.
    pub fn extra(&self, name: &str) -> Option<&PropValue> {
        self.extras.get(name)
    }
}

/// A property container: a restricted mapping with a dual access surface.
///
/// A container is an instance of the concrete variant described by its
/// [`PropSchema`]: only declared names can ever be read, written, or
/// enumerated. Each operation comes in an attribute form (`get_attr`,
/// `set_attr`, `del_attr`) and an item form (`get_item`, `set_item`,
/// `del_item`); the two differ only in the error variants they report.
/// If the schema binds a custom accessor for a name, the accessor is
/// invoked instead of the raw storage operation, for both forms alike;
/// membership and unset errors an accessor forwards out of the raw
/// primitives are restated in the requesting form.
///
/// # Examples
///
/// ```
/// use slotbox::prelude::*;
///
/// let schema = PropSchema::builder().keys(["foo", "bar"]).build()?;
/// let mut can = PropContainer::with_props(
///     schema,
///     [("foo", "bar"), ("bar", "foo")],
/// )?;
///
/// assert_eq!(can.len(), 2);
/// assert_eq!(can.get_item("foo")?, PropValue::from("bar"));
/// assert_eq!(can.get_attr("bar")?, PropValue::from("foo"));
///
/// can.del_item("bar")?;
/// assert_eq!(can.len(), 1);
/// assert!(!can.contains("bar"));
/// # Ok::<(), slotbox::error::PropError>(())
/// ```
#[derive(Clone)]
pub struct PropContainer {
    schema: Arc<PropSchema>,
    storage: BTreeMap<String, PropValue>,
    extras: BTreeMap<String, PropValue>,
}

impl PropContainer {
    /// Creates an empty container for the given variant.
    pub fn new(schema: Arc<PropSchema>) -> Self {
        Self {
            schema,
            storage: BTreeMap::new(),
            extras: BTreeMap::new(),
        }
    }

    /// Creates a container and applies each `(name, value)` pair through
    /// the normal item-form setter path, so custom setters intercept
    /// construction too. Later duplicates win.
    ///
    /// Under the strict policy an undeclared name fails construction with
    /// [`PropError::KeyNotSettable`]; under the lenient policy it is
    /// silently dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbox::prelude::*;
    ///
    /// let schema = PropSchema::builder().key("foo").lenient().build()?;
    /// let can = PropContainer::with_props(
    ///     schema,
    ///     [("foo", "bar"), ("bar", "foo")],
    /// )?;
    /// assert_eq!(can.len(), 1);
    /// # Ok::<(), slotbox::error::PropError>(())
    /// ```
    pub fn with_props<I, K, V>(schema: Arc<PropSchema>, props: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropValue>,
    {
        let mut can = Self::new(schema);
        for (key, value) in props {
            let name = key.into();
            if can.schema.is_lenient() && !can.schema.allows(&name) {
                debug!(property = %name, "dropping undeclared key at construction");
                continue;
            }
            can.set_item(&name, value)?;
        }
        Ok(can)
    }

    /// Returns the variant declaration this container was built from.
    pub fn schema(&self) -> &Arc<PropSchema> {
        &self.schema
    }

    /// Reads a property, attribute form.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownAttr`] for an undeclared name,
    /// [`PropError::UnsetAttr`] for a declared name with no stored value
    /// (lenient variants return `Ok(PropValue::Null)` instead).
    pub fn get_attr(&mut self, name: &str) -> Result<PropValue> {
        self.get_inner(name, Form::Attr)
    }

    /// Reads a property, item form.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownKey`] for an undeclared name,
    /// [`PropError::UnsetKey`] for a declared name with no stored value
    /// (lenient variants return `Ok(PropValue::Null)` instead).
    pub fn get_item(&mut self, name: &str) -> Result<PropValue> {
        self.get_inner(name, Form::Item)
    }

    /// Writes a property, attribute form.
    ///
    /// # Errors
    ///
    /// [`PropError::AttrNotSettable`] for an undeclared name.
    pub fn set_attr(&mut self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        self.set_inner(name, value.into(), Form::Attr)
    }

    /// Writes a property, item form.
    ///
    /// # Errors
    ///
    /// [`PropError::KeyNotSettable`] for an undeclared name.
    pub fn set_item(&mut self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        self.set_inner(name, value.into(), Form::Item)
    }

    /// Deletes a property, attribute form.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownAttr`] for an undeclared name,
    /// [`PropError::UnsetAttr`] if the property is not currently set.
    pub fn del_attr(&mut self, name: &str) -> Result<()> {
        self.del_inner(name, Form::Attr)
    }

    /// Deletes a property, item form.
    ///
    /// # Errors
    ///
    /// [`PropError::UnknownKey`] for an undeclared name,
    /// [`PropError::UnsetKey`] if the property is not currently set.
    pub fn del_item(&mut self, name: &str) -> Result<()> {
        self.del_inner(name, Form::Item)
    }

    /// Reads the backing value for `name`, bypassing any custom getter.
    ///
    /// Usable from outside accessors too, e.g. to seed values without
    /// triggering interception.
    pub fn raw_get(&self, name: &str) -> Result<PropValue> {
        if !self.schema.allows(name) {
            return Err(PropError::UnknownKey { name: name.into() });
        }
        self.storage
            .get(name)
            .cloned()
            .ok_or_else(|| PropError::UnsetKey { name: name.into() })
    }

    /// Stores `value` under `name` verbatim, bypassing any custom setter
    /// and the lenient no-value folding.
    pub fn raw_set(&mut self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        if !self.schema.allows(name) {
            return Err(PropError::KeyNotSettable { name: name.into() });
        }
        self.storage.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Removes `name` from storage, bypassing any custom deleter.
    pub fn raw_del(&mut self, name: &str) -> Result<()> {
        if !self.schema.allows(name) {
            return Err(PropError::UnknownKey { name: name.into() });
        }
        if self.storage.remove(name).is_none() {
            return Err(PropError::UnsetKey { name: name.into() });
        }
        Ok(())
    }

    /// Assigns an out-of-band attribute, outside the allowed-key set.
    ///
    /// Extras do not affect storage, length, enumeration, equality, or the
    /// string form.
    pub fn set_extra(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.extras.insert(name.into(), value.into());
    }

    /// Reads an out-of-band attribute.
    pub fn extra(&self, name: &str) -> Option<&PropValue> {
        self.extras.get(name)
    }

    /// Returns `true` if `name` is currently set in storage.
    ///
    /// Unknown names yield `false`, never an error.
    pub fn contains(&self, name: &str) -> bool {
        self.storage.contains_key(name)
    }

    /// Number of properties currently set in storage.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no property is currently set.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over the currently-set property names, in sorted order.
    ///
    /// The iterator borrows the container; call again for a fresh pass
    /// after mutation.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.storage.keys().map(String::as_str)
    }

    /// Iterates over the currently-set values, in key order.
    pub fn values(&self) -> impl Iterator<Item = &PropValue> {
        self.storage.values()
    }

    /// Iterates over the currently-set `(name, value)` pairs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn raw_view(&mut self) -> RawProps<'_> {
        RawProps {
            keys: self.schema.key_set(),
            storage: &mut self.storage,
            extras: &mut self.extras,
        }
    }

    fn get_inner(&mut self, name: &str, form: Form) -> Result<PropValue> {
        if !self.schema.allows(name) {
            return Err(form.unknown(name));
        }
        if let Some(getter) = self.schema.getter(name) {
            trace!(property = name, "dispatching custom getter");
            let mut raw = self.raw_view();
            return getter(&mut raw).map_err(|e| form.requalify(e));
        }
        match self.storage.get(name) {
            Some(value) => Ok(value.clone()),
            None if self.schema.is_lenient() => Ok(PropValue::Null),
            None => Err(form.unset(name)),
        }
    }

    fn set_inner(&mut self, name: &str, value: PropValue, form: Form) -> Result<()> {
        if !self.schema.allows(name) {
            return Err(form.not_settable(name));
        }
        if let Some(setter) = self.schema.setter(name) {
            trace!(property = name, "dispatching custom setter");
            let mut raw = self.raw_view();
            return setter(&mut raw, value).map_err(|e| form.requalify(e));
        }
        if self.schema.is_lenient() && value.is_null() {
            debug!(property = name, "no-value sentinel assigned, removing property");
            self.storage.remove(name);
            return Ok(());
        }
        self.storage.insert(name.to_string(), value);
        Ok(())
    }

    fn del_inner(&mut self, name: &str, form: Form) -> Result<()> {
        if !self.schema.allows(name) {
            return Err(form.unknown(name));
        }
        if let Some(deleter) = self.schema.deleter(name) {
            trace!(property = name, "dispatching custom deleter");
            let mut raw = self.raw_view();
            return deleter(&mut raw).map_err(|e| form.requalify(e));
        }
        if self.storage.remove(name).is_none() {
            return Err(form.unset(name));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PropContainer {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}

/// Structural equality over the currently-set pairs. The schema identity
/// and out-of-band extras do not participate.
impl PartialEq for PropContainer {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl PartialEq<BTreeMap<String, PropValue>> for PropContainer {
    fn eq(&self, other: &BTreeMap<String, PropValue>) -> bool {
        &self.storage == other
    }
}

impl PartialEq<PropContainer> for BTreeMap<String, PropValue> {
    fn eq(&self, other: &PropContainer) -> bool {
        self == &other.storage
    }
}

/// Renders exactly like a plain `BTreeMap` holding the same pairs.
impl fmt::Debug for PropContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.storage.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PropValue;

    fn strict(keys: &[&str]) -> Arc<PropSchema> {
        PropSchema::builder().keys(keys.to_vec()).build().unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let can = PropContainer::new(strict(&["foo"]));
        assert_eq!(can.len(), 0);
        assert!(can.is_empty());
        assert!(!can.contains("foo"));
    }

    #[test]
    fn test_raw_roundtrip() {
        let mut can = PropContainer::new(strict(&["foo"]));
        can.raw_set("foo", "bar").unwrap();
        assert_eq!(can.raw_get("foo").unwrap(), PropValue::from("bar"));
        can.raw_del("foo").unwrap();
        assert!(matches!(
            can.raw_get("foo"),
            Err(PropError::UnsetKey { .. })
        ));
    }

    #[test]
    fn test_raw_membership() {
        let mut can = PropContainer::new(strict(&["foo"]));
        assert!(matches!(
            can.raw_get("bar"),
            Err(PropError::UnknownKey { .. })
        ));
        assert!(matches!(
            can.raw_set("bar", 1),
            Err(PropError::KeyNotSettable { .. })
        ));
        assert!(matches!(
            can.raw_del("bar"),
            Err(PropError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_extras_invisible_to_mapping_surface() {
        let mut can = PropContainer::new(strict(&["foo"]));
        can.set_extra("bookkeeping", true);
        assert_eq!(can.len(), 0);
        assert!(!can.contains("bookkeeping"));
        assert_eq!(can.keys().count(), 0);
        assert_eq!(can.extra("bookkeeping"), Some(&PropValue::Bool(true)));
        assert_eq!(can, BTreeMap::<String, PropValue>::new());
        assert_eq!(format!("{:?}", can), "{}");
    }

    #[test]
    fn test_debug_matches_plain_map() {
        let mut can = PropContainer::new(strict(&["foo", "bar"]));
        can.set_item("foo", 1).unwrap();
        can.set_item("bar", "two").unwrap();

        let mut map = BTreeMap::new();
        map.insert("foo".to_string(), PropValue::Int(1));
        map.insert("bar".to_string(), PropValue::from("two"));
        assert_eq!(format!("{:?}", can), format!("{:?}", map));
    }

    #[test]
    fn test_iteration_order_stable() {
        let mut can = PropContainer::new(strict(&["b", "a", "c"]));
        can.set_item("c", 3).unwrap();
        can.set_item("a", 1).unwrap();
        let first: Vec<&str> = can.keys().collect();
        let second: Vec<&str> = can.keys().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a", "c"]);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut can = PropContainer::new(strict(&["foo"]));
        can.set_item("foo", "bar").unwrap();
        let collected: Vec<_> = (&can).into_iter().collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].0, "foo");
    }

    #[test]
    fn test_schema_accessor() {
        let schema = strict(&["foo"]);
        let can = PropContainer::new(schema.clone());
        assert!(Arc::ptr_eq(can.schema(), &schema));
    }
}
