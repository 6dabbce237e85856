pub mod cache;
pub mod mem;

pub use crate::cache::ProfileCache;
pub use crate::mem::{MemSessions, MemStore};
