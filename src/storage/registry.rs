//! Database Registry
//!
//! The registry maps database ids to [`Database`]s and creates databases the
//! first time an id is asked for. It is built once at startup and handed to
//! every component that needs a database; clones share the same databases.
//!
//! ## Lazy Creation
//!
//! `get_or_create` is double-checked: it probes under the read lock, and only
//! on a miss takes the write lock, probes again (another caller may have won
//! the race in between) and then creates. Lookups of existing databases,
//! the common case, never queue behind the write lock.

use crate::storage::database::Database;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Database id.
pub type DatabaseId = u64;

/// Id to database map.
pub type Databases = HashMap<DatabaseId, Arc<Database>>;

/// Sizing for the registry and the databases it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Initial capacity of each database's key maps (default: 32)
    pub keys_capacity: usize,

    /// Initial capacity of the id to database map (default: 3)
    pub databases_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            keys_capacity: 32,
            databases_capacity: 3,
        }
    }
}

/// State shared by every registry handle.
///
/// Databases point back here through a `Weak`.
#[derive(Debug)]
pub(crate) struct RegistryInner {
    config: RegistryConfig,
    databases: RwLock<Databases>,
}

/// Owns every database and hands them out by id.
///
/// Cloning is cheap and yields a handle to the same databases.
///
/// # Example
///
/// ```
/// use keyspace::storage::DatabaseRegistry;
/// use std::sync::Arc;
///
/// let registry = DatabaseRegistry::new();
///
/// let db = registry.get_or_create(0);
/// assert!(Arc::ptr_eq(&db, &registry.get_or_create(0)));
/// assert_eq!(registry.list().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for DatabaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseRegistry {
    /// Creates an empty registry with default settings.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given settings.
    pub fn with_config(config: RegistryConfig) -> Self {
        let databases = HashMap::with_capacity(config.databases_capacity);

        Self {
            inner: Arc::new(RegistryInner {
                config,
                databases: RwLock::new(databases),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    /// Returns the settings this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Gets the database with the given id, creating it if it does not exist.
    ///
    /// Every call with the same id returns the same instance, also when
    /// callers race on the first access.
    pub fn get_or_create(&self, id: DatabaseId) -> Arc<Database> {
        let existing = self.inner.databases.read().get(&id).cloned();
        if let Some(db) = existing {
            return db;
        }

        let mut databases = self.inner.databases.write();
        // Another caller may have created it between the two locks
        if let Some(db) = databases.get(&id) {
            return Arc::clone(db);
        }

        let db = Arc::new(Database::new(
            id,
            Arc::downgrade(&self.inner),
            self.inner.config.keys_capacity,
        ));
        databases.insert(id, Arc::clone(&db));
        debug!(db = id, databases = databases.len(), "Created database");

        db
    }

    /// Returns all databases created so far.
    pub fn list(&self) -> Databases {
        self.inner.databases.read().clone()
    }

    /// Returns the number of databases created so far.
    pub fn len(&self) -> usize {
        self.inner.databases.read().len()
    }

    /// Returns true if no database has been created yet.
    pub fn is_empty(&self) -> bool {
        self.inner.databases.read().is_empty()
    }
}
