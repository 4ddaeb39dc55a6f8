//! # morph-session
//!
//! Session state for morph annotation work.
//!
//! The [`SessionStore`] owns the ordered item list and the current selection,
//! recomputes suggestions through the classification engine on every feature
//! write, and mirrors each mutation to a [`KeyValueStore`] via [`Persistence`].
//! The [`export`] module projects a session into structured JSON and a flat
//! comma-separated table.

pub mod error;
pub mod export;
pub mod kv;
pub mod persistence;
pub mod session;
pub mod store;
pub mod summary;
pub mod updates;

pub use error::SessionError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use persistence::Persistence;
pub use session::Session;
pub use store::SessionStore;

#[cfg(test)]
pub(crate) mod test_support;
