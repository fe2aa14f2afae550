//! # memstore
//!
//! An observable in-memory record store: a keyed table of records with
//! before/after write notification, traversal, and pluggable selection.
//!
//! ## Core Concepts
//!
//! - **Records**: Any `Clone` value carrying a unique string identifier
//! - **Store**: One authoritative table per instance, last write wins
//! - **Channels**: Synchronous pub/sub fired before and after each write
//! - **Factory**: The only way to obtain a store instance
//! - **Loader**: Feeds a JSON record file through a sink adapter
//!
//! ## Example
//!
//! ```
//! use memstore::{Record, Store, StoreFactory};
//!
//! #[derive(Clone)]
//! struct Creature {
//!     id: String,
//!     attack: i64,
//! }
//!
//! impl Record for Creature {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let store: Store<Creature> = StoreFactory::new().create();
//!
//! let handle = store.on_after_write(|event| {
//!     println!("wrote {}", event.value.id());
//! });
//!
//! store.set(Creature { id: "1".into(), attack: 140 })?;
//! store.set(Creature { id: "2".into(), attack: 122 })?;
//!
//! let strongest = store.select_best(|c| c.attack);
//! assert_eq!(strongest.map(|c| c.id), Some("1".to_string()));
//!
//! handle.unsubscribe();
//! # Ok::<(), memstore::StoreError>(())
//! ```

pub mod adapter;
pub mod channel;
pub mod error;
pub mod loader;
pub mod store;
pub mod types;

// Re-exports
pub use adapter::{RecordSink, StoreAdapter};
pub use channel::{Channel, SubscriptionHandle};
pub use error::{Result, StoreError};
pub use loader::load_records;
pub use store::{Store, StoreFactory};
pub use types::{AfterWrite, BeforeWrite, ListenerId, Record};
