//! Storage Module
//!
//! The key space: numbered databases of key/item pairs with lazy expiry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DatabaseRegistry                         │
//! │                 RwLock<id -> Database>                      │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐             │
//! │  │ Database 0 │  │ Database 1 │  │ Database N │             │
//! │  │  RwLock    │  │  RwLock    │  │  RwLock    │             │
//! │  └─────┬──────┘  └────────────┘  └────────────┘             │
//! └────────┼────────────────────────────────────────────────────┘
//!          │ every expiry decision
//!          ▼
//!   ┌──────────────┐
//!   │ expiry policy│
//!   └──────────────┘
//! ```
//!
//! ## Features
//!
//! - **Lazy Creation**: Databases spring into existence on first access
//! - **Per-Database RwLock**: Concurrent readers, exclusive writers
//! - **Polymorphic Items**: Values are trait objects with a stable type tag
//! - **Lazy Expiry**: Expired keys are evicted by expiry-aware reads only
//! - **Deletion Hooks**: Items run cleanup right before their key is removed
//!
//! ## Example
//!
//! ```
//! use keyspace::storage::{DatabaseRegistry, Item, ValueType};
//! use bytes::Bytes;
//! use std::any::Any;
//! use std::sync::Arc;
//! use std::time::SystemTime;
//!
//! #[derive(Debug)]
//! struct Text(String);
//!
//! impl Item for Text {
//!     fn value(&self) -> &dyn Any { &self.0 }
//!     fn value_type(&self) -> ValueType { 0 }
//!     fn value_type_fancy(&self) -> &'static str { "string" }
//!     fn expiry(&self) -> Option<SystemTime> { None }
//! }
//!
//! let registry = DatabaseRegistry::new();
//! let db = registry.get_or_create(0);
//!
//! db.set(Bytes::from("name"), Arc::new(Text("Ariz".into())));
//!
//! let item = db.get(&Bytes::from("name")).unwrap();
//! assert_eq!(item.value().downcast_ref::<String>().unwrap(), "Ariz");
//! assert_eq!(db.delete_keys([&Bytes::from("name")]), 1);
//! ```

pub mod database;
pub mod expiry;
pub mod item;
pub mod registry;

// Re-export commonly used types
pub use database::{Database, DatabaseStats};
pub use expiry::{is_item_expired, is_item_expired_at, is_timestamp_expired, is_timestamp_expired_at};
pub use item::{Item, Keys, ValueType};
pub use registry::{DatabaseId, DatabaseRegistry, Databases, RegistryConfig};
