//! Thread-Safe Database with Lazy Expiry
//!
//! A [`Database`] is one numbered key space. It holds two maps behind a
//! single read/write lock:
//!
//! - `keys`: every key and its item. This map decides whether a key exists.
//! - `expiring_keys`: only the keys whose item declared an expiry when it was
//!   last written. This is the set a sweeper or a TTL scan has to look at.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Database                    │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ RwLock                                 │  │
//! │  │   keys:          HashMap<Bytes, Item>  │  │
//! │  │   expiring_keys: HashMap<Bytes, Item>  │  │
//! │  └────────────────────────────────────────┘  │
//! │  registry: Weak ──> DatabaseRegistry         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Reads (`get`, `exists`, `has_expiry`, `all_keys`, ...) share the lock.
//! Writes (`set`, `delete_keys`) and the expiry-aware read
//! `get_or_expired` take it exclusively. `get_or_expired` locks
//! exclusively even when nothing turns out to be expired, so the expiry
//! check and the eviction happen under the same guard.
//!
//! ## Expiry
//!
//! Expiry is lazy. `get`, `exists` and `all_keys` return expired items as
//! if they were alive; only `get_or_expired` consults the
//! [expiry policy](crate::storage::expiry).

use crate::storage::expiry::is_item_expired;
use crate::storage::item::{Item, Keys};
use crate::storage::registry::{DatabaseId, DatabaseRegistry, RegistryInner};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// The two maps guarded by the database lock.
#[derive(Debug)]
struct KeySpace {
    /// All keys in this database
    keys: Keys,
    /// Keys with an expiry set
    expiring_keys: Keys,
}

impl KeySpace {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: HashMap::with_capacity(capacity),
            expiring_keys: HashMap::with_capacity(capacity),
        }
    }

    /// Runs the deletion hook and removes `key` from both maps.
    ///
    /// Returns `false` if the key did not exist.
    fn delete(&mut self, key: &Bytes, db: &Database) -> bool {
        let Some(item) = self.keys.get(key).cloned() else {
            return false;
        };

        item.on_delete(key, db);
        self.keys.remove(key);
        self.expiring_keys.remove(key);
        true
    }
}

/// A single numbered key space.
///
/// Databases are created and owned by a
/// [`DatabaseRegistry`]; obtain one with
/// [`DatabaseRegistry::get_or_create`].
///
/// # Example
///
/// ```
/// use keyspace::storage::{DatabaseRegistry, Item, ValueType};
/// use bytes::Bytes;
/// use std::any::Any;
/// use std::sync::Arc;
/// use std::time::{Duration, SystemTime};
///
/// #[derive(Debug)]
/// struct Session(Option<SystemTime>);
///
/// impl Item for Session {
///     fn value(&self) -> &dyn Any { &() }
///     fn value_type(&self) -> ValueType { 7 }
///     fn value_type_fancy(&self) -> &'static str { "session" }
///     fn expiry(&self) -> Option<SystemTime> { self.0 }
/// }
///
/// let registry = DatabaseRegistry::new();
/// let db = registry.get_or_create(0);
///
/// let stale = SystemTime::now() - Duration::from_secs(60);
/// db.set(Bytes::from("session"), Arc::new(Session(Some(stale))));
///
/// // Plain reads ignore expiry...
/// assert!(db.get(&Bytes::from("session")).is_some());
///
/// // ...the expiry-aware read does not, and evicts on request.
/// assert!(db.get_or_expired(&Bytes::from("session"), true).is_none());
/// assert!(!db.exists(&Bytes::from("session")));
/// ```
pub struct Database {
    /// Database id
    id: DatabaseId,

    /// Both key maps, under one lock
    space: RwLock<KeySpace>,

    /// Non-owning handle to the registry that created this database
    registry: Weak<RegistryInner>,

    /// Statistics: get and get_or_expired calls
    get_count: AtomicU64,

    /// Statistics: set calls
    set_count: AtomicU64,

    /// Statistics: keys removed by delete_keys
    del_count: AtomicU64,

    /// Statistics: keys evicted by get_or_expired
    expired_count: AtomicU64,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("id", &self.id)
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .field("del_count", &self.del_count.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Creates an empty database owned by `registry`.
    pub(crate) fn new(id: DatabaseId, registry: Weak<RegistryInner>, capacity: usize) -> Self {
        Self {
            id,
            space: RwLock::new(KeySpace::with_capacity(capacity)),
            registry,
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
            expired_count: AtomicU64::new(0),
        }
    }

    /// Gets the database id.
    #[inline]
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    /// Gets the registry this database belongs to.
    ///
    /// Returns `None` once the registry and all its handles are gone.
    pub fn registry(&self) -> Option<DatabaseRegistry> {
        self.registry.upgrade().map(DatabaseRegistry::from_inner)
    }

    /// Returns true if the database holds no keys.
    pub fn is_empty(&self) -> bool {
        self.space.read().keys.is_empty()
    }

    /// Returns true if no key has an expiry set.
    pub fn is_empty_of_expiring(&self) -> bool {
        self.space.read().expiring_keys.is_empty()
    }

    /// Returns the number of keys, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.space.read().keys.len()
    }

    /// Returns the number of keys with an expiry set.
    pub fn expiring_len(&self) -> usize {
        self.space.read().expiring_keys.len()
    }

    /// Gets all keys in this database.
    ///
    /// The map reflects the database at the moment the lock is released.
    /// Items are shared with the database, not copied.
    pub fn all_keys(&self) -> Keys {
        self.space.read().keys.clone()
    }

    /// Gets the keys with an expiry set.
    pub fn expiring_keys(&self) -> Keys {
        self.space.read().expiring_keys.clone()
    }

    /// Sets a key to an item, overwriting any previous item.
    ///
    /// If the new item expires, the key is (re)indexed as expiring. If it
    /// does not, a leftover index entry from a previous expiring item is
    /// dropped. The previous item's deletion hook is not called.
    pub fn set(&self, key: Bytes, item: Arc<dyn Item>) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.space.write();
        if item.expires() {
            space.expiring_keys.insert(key.clone(), Arc::clone(&item));
        } else {
            space.expiring_keys.remove(&key);
        }
        space.keys.insert(key, item);
    }

    /// Gets the item for a key, or `None` if the key does not exist.
    ///
    /// Expiry is not checked: an expired item that has not been evicted yet
    /// is still returned. Use [`get_or_expired`](Self::get_or_expired) for
    /// expiry-aware reads.
    pub fn get(&self, key: &Bytes) -> Option<Arc<dyn Item>> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.space.read().keys.get(key).cloned()
    }

    /// Checks if a key exists. Expiry is not checked.
    pub fn exists(&self, key: &Bytes) -> bool {
        self.space.read().keys.contains_key(key)
    }

    /// Checks if a key is in the expiring index.
    pub fn has_expiry(&self, key: &Bytes) -> bool {
        self.space.read().expiring_keys.contains_key(key)
    }

    /// Gets the item for a key, or `None` if it does not exist or has expired.
    ///
    /// With `delete_if_expired`, an expired key is removed the same way
    /// [`delete_keys`](Self::delete_keys) removes it, deletion hook included.
    /// Callers cannot tell "never existed" from "expired".
    pub fn get_or_expired(&self, key: &Bytes, delete_if_expired: bool) -> Option<Arc<dyn Item>> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.space.write();
        let item = space.keys.get(key).cloned()?;

        if !is_item_expired(&*item) {
            return Some(item);
        }

        if delete_if_expired && space.delete(key, self) {
            self.expired_count.fetch_add(1, Ordering::Relaxed);
            debug!(db = self.id, key = ?key, "Evicted expired key");
        }
        None
    }

    /// Deletes keys, returning how many of them existed.
    ///
    /// Each existing key's deletion hook runs once before the key leaves
    /// both maps. Missing keys are skipped.
    pub fn delete_keys<'a, I>(&self, keys: I) -> u64
    where
        I: IntoIterator<Item = &'a Bytes>,
    {
        let mut space = self.space.write();
        let mut deleted = 0;

        for key in keys {
            if space.delete(key, self) {
                trace!(db = self.id, key = ?key, "Deleted key");
                deleted += 1;
            }
        }

        self.del_count.fetch_add(deleted, Ordering::Relaxed);
        deleted
    }

    /// Deletes a single key.
    ///
    /// Returns `true` if the key existed.
    pub fn delete(&self, key: &Bytes) -> bool {
        self.delete_keys(std::iter::once(key)) == 1
    }

    /// Returns database statistics.
    pub fn stats(&self) -> DatabaseStats {
        let (keys, expiring_keys) = {
            let space = self.space.read();
            (space.keys.len() as u64, space.expiring_keys.len() as u64)
        };

        DatabaseStats {
            keys,
            expiring_keys,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            deleted: self.del_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
        }
    }
}

/// Database statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    /// Number of keys, expired-but-present ones included
    pub keys: u64,
    /// Number of keys with an expiry set
    pub expiring_keys: u64,
    /// Total get operations
    pub get_ops: u64,
    /// Total set operations
    pub set_ops: u64,
    /// Keys removed by explicit deletes
    pub deleted: u64,
    /// Keys lazily evicted after expiring
    pub expired: u64,
}
