//! # keyspace - The Key Space of a Redis-Compatible Database
//!
//! This crate is the in-memory heart of a Redis-like server: a set of
//! independent, numbered databases, each mapping keys to polymorphic
//! values with optional expiry. Command dispatch, the wire protocol,
//! persistence and the concrete value types all sit on top of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  command layer / persistence / ...                                  │
//! └───────────────┬─────────────────────────────────────────────────────┘
//!                 │ get_or_create(id)
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        DatabaseRegistry                             │
//! │   ┌──────────────────┐  ┌──────────────────┐                        │
//! │   │   Database 0     │  │   Database 1     │   ...                  │
//! │   │  keys            │  │  keys            │                        │
//! │   │  expiring_keys   │  │  expiring_keys   │                        │
//! │   └──────────────────┘  └──────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                 │ Arc<dyn Item>
//!                 ▼
//!        concrete value types (strings, lists, hashes, ...)
//! ```
//!
//! ## Module Overview
//!
//! - [`storage::registry`]: id to database map with lazy, race-free creation
//! - [`storage::database`]: one key space, its expiring-key index and locking
//! - [`storage::item`]: the contract every stored value implements
//! - [`storage::expiry`]: the pure functions deciding what is expired
//!
//! ## Design Highlights
//!
//! ### Thread Safety
//!
//! The registry and every database sit behind their own `RwLock`. Reads run
//! in parallel; writes and expiry-aware reads are exclusive per database.
//!
//! ### Lazy Expiry
//!
//! An expired key stays put until [`Database::get_or_expired`] or an
//! explicit delete touches it. There is no background sweeper.
//!
//! ### Stable Type Tags
//!
//! Each item reports a numeric type tag that the persistence layer writes to
//! disk, so tags are explicit constants per concrete type.

pub mod storage;

// Re-export commonly used types for convenience
pub use storage::{Database, DatabaseId, DatabaseRegistry, Item, Keys, RegistryConfig, ValueType};

/// Version of keyspace
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
