//! In-memory backing store for formulaire
//!
//! Implements the [`FormStore`](formulaire_forms::FormStore) port with
//! plain in-process maps: id assignment, cascading deletes, and the
//! ordering guarantees the domain expects, without an external
//! database. Applications use it for development and tests.

pub mod memory;

pub use memory::MemoryStore;
