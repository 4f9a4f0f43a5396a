//! Expiry Policy
//!
//! Every expiry decision in the key space goes through the functions in
//! this module. They are pure: the only input besides their arguments is
//! the wall clock, and each has an `_at` twin that takes the current time
//! explicitly so tests can pin the clock.
//!
//! ## Lazy Expiry
//!
//! Nothing here removes keys. A key whose expiry has passed stays in its
//! database until an expiry-aware read
//! ([`Database::get_or_expired`](crate::storage::Database::get_or_expired))
//! or an explicit delete touches it. A future background sweeper should
//! call [`is_item_expired`] under the database's write lock and remove keys
//! through the same path so deletion hooks still run exactly once.

use crate::storage::item::Item;
use std::time::SystemTime;

/// Checks if a timestamp is expired, i.e. strictly before now.
#[inline]
pub fn is_timestamp_expired(expire_at: SystemTime) -> bool {
    is_timestamp_expired_at(expire_at, SystemTime::now())
}

/// Checks if `expire_at` is strictly before `now`.
#[inline]
pub fn is_timestamp_expired_at(expire_at: SystemTime, now: SystemTime) -> bool {
    expire_at < now
}

/// Checks if an item has an expiry and that expiry has passed.
#[inline]
pub fn is_item_expired(item: &dyn Item) -> bool {
    is_item_expired_at(item, SystemTime::now())
}

/// Checks if an item has an expiry that is strictly before `now`.
#[inline]
pub fn is_item_expired_at(item: &dyn Item, now: SystemTime) -> bool {
    match item.expiry() {
        Some(expire_at) => item.expires() && is_timestamp_expired_at(expire_at, now),
        None => false,
    }
}
