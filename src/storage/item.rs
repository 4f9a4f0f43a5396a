//! The Item Contract
//!
//! An [`Item`] is the value stored at a key. The key space never looks
//! inside an item: it only asks for the capabilities defined here.
//!
//! Concrete value types (strings, lists, hashes, sets, sorted sets) live
//! outside this crate and implement the trait.
//!
//! ## Type Tags
//!
//! [`Item::value_type`] returns a numeric tag that is written to disk by the
//! persistence layer. A tag must stay the same for a concrete type forever,
//! so declare it as an explicit constant on the type.

use crate::storage::database::Database;
use bytes::Bytes;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Stable numeric tag identifying a concrete item type on disk.
pub type ValueType = u64;

/// Key-item map.
///
/// Items are shared, never copied: the database and its callers hold the
/// same `Arc`.
pub type Keys = HashMap<Bytes, Arc<dyn Item>>;

/// The value of a key.
///
/// # Example
///
/// ```
/// use keyspace::storage::{Item, ValueType};
/// use std::any::Any;
/// use std::time::SystemTime;
///
/// #[derive(Debug)]
/// struct StringItem {
///     value: String,
///     expiry: Option<SystemTime>,
/// }
///
/// impl StringItem {
///     const TYPE: ValueType = 0;
/// }
///
/// impl Item for StringItem {
///     fn value(&self) -> &dyn Any {
///         &self.value
///     }
///
///     fn value_type(&self) -> ValueType {
///         Self::TYPE
///     }
///
///     fn value_type_fancy(&self) -> &'static str {
///         "string"
///     }
///
///     fn expiry(&self) -> Option<SystemTime> {
///         self.expiry
///     }
/// }
/// ```
pub trait Item: Send + Sync + fmt::Debug {
    /// The payload of the item.
    fn value(&self) -> &dyn Any;

    /// The type tag used when (de)serializing the item.
    fn value_type(&self) -> ValueType;

    /// The type of the item as a human-readable name.
    fn value_type_fancy(&self) -> &'static str;

    /// When the item expires, or `None` if it never does.
    fn expiry(&self) -> Option<SystemTime>;

    /// Whether an expiry is set.
    #[inline]
    fn expires(&self) -> bool {
        self.expiry().is_some()
    }

    /// Called exactly once, right before the item's key is removed from `db`.
    ///
    /// The database holds its exclusive lock for the duration of this call.
    /// Calling back into `db` from here deadlocks.
    fn on_delete(&self, _key: &Bytes, _db: &Database) {}
}
