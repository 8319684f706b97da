//! Session state: the authenticated identity, its persistence, and the
//! store that owns it

mod model;
mod storage;
mod store;

pub use model::{BearerToken, Identity, Session};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, STORAGE_FILE};
pub use store::{AuthState, DEFAULT_STORAGE_KEY, SessionEvent, SessionStore, Subscription};
