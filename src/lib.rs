// SPDX-License-Identifier: MIT OR Apache-2.0

//! A slot-restricted property container with interceptable accessors.
//!
//! This crate provides a small object model: a container that behaves
//! simultaneously as a restricted key-value mapping and as an object with
//! named properties, where each property may optionally be intercepted by
//! user-supplied accessor logic (custom getter/setter/deleter) without the
//! consumer needing to know whether interception is in effect.
//!
//! # Architecture
//!
//! Two cooperating abstractions:
//!
//! - **Schema**: the immutable declaration of a concrete variant — its
//!   closed allowed-key set, key policy, and accessor bindings
//!   ([`PropSchema`], built once, shared via `Arc`)
//! - **Container**: an instance of a variant, holding only the properties
//!   currently set, plus an out-of-band extras namespace for accessor
//!   bookkeeping ([`PropContainer`])
//!
//! Both the attribute-form and item-form operations funnel through the same
//! primitives, so the two access styles are always consistent; they differ
//! only in the error variants they report. Custom accessors receive a
//! [`RawProps`] view exposing raw storage primitives only, so accessor
//! bodies can never recurse into their own interception.
//!
//! # Key policies
//!
//! - **Strict** (default): undeclared keys supplied at construction fail;
//!   reading a declared-but-unset property fails.
//! - **Lenient**: undeclared keys supplied at construction are dropped;
//!   assigning [`PropValue::Null`] removes the property; reading a
//!   declared-but-unset property yields `Null`.
//!
//! # Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` on [`PropValue`] (default)
//!
//! # Quick Start
//!
//! ```rust
//! use slotbox::prelude::*;
//!
//! # fn main() -> slotbox::error::Result<()> {
//! let schema = PropSchema::builder()
//!     .keys(["hostname", "port"])
//!     .build()?;
//!
//! let mut host = PropContainer::with_props(schema, [("hostname", "example.org")])?;
//! host.set_attr("port", 22)?;
//!
//! assert_eq!(host.len(), 2);
//! assert_eq!(host.get_item("hostname")?, PropValue::from("example.org"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod container;
pub mod error;
pub mod schema;
pub mod value;

pub use container::{PropContainer, RawProps};
pub use error::{PropError, Result};
pub use schema::{KeyPolicy, PropSchema, SchemaBuilder};
pub use value::PropValue;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types for convenient access.
pub mod prelude {
    pub use crate::container::{PropContainer, RawProps};
    pub use crate::error::{PropError, Result};
    pub use crate::schema::{KeyPolicy, PropSchema, SchemaBuilder};
    pub use crate::value::PropValue;
}
