pub mod aggregate;
pub mod config;
pub mod error;
pub mod identity;
pub mod pronto;
pub mod store;
pub mod validation;

pub mod types;

pub use crate::config::ProntoConfig;
pub use crate::error::ProntoError;
pub use crate::pronto::Pronto;
pub use crate::store::{IdentityCache, SessionProvider, Store};
