//! Backing store module.
//!
//! The in-memory implementation of the [`FormStore`](crate::FormStore)
//! port.
//!
//! # Examples
//!
//! ```
//! use formulaire::FormStore;
//! use formulaire::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! assert!(store.all_forms().is_empty());
//! ```

pub use formulaire_store::*;
