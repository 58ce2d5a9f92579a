// Session state: schema reconciliation, persistence and the document store.
// Everything here is synchronous; callers hold the store behind a mutex and
// never across an await point.

pub mod editing;
pub mod reconcile;
pub mod session;
pub mod storage;

pub use session::{SessionStore, StoreError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
