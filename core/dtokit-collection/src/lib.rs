//! In-memory collection of DTOs indexed by one of their fields.
//!
//! Adding an item whose key is already stored merges instead of
//! overwriting: fields the incoming item leaves unset inherit the stored
//! values. See [`IndexedCollection::update`].

mod collection;

pub use collection::IndexedCollection;
