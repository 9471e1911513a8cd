//! Credential protection at rest: a token vault encrypting one secret string
//! under AES-256-GCM, with the symmetric key kept in a separate file whose
//! location is resolved through a small config indirection.
//!
//! The vault is synchronous by design; it is an operator-driven bootstrap
//! utility, not a service. Concurrent saves from two processes race
//! last-writer-wins on each file independently and can leave a mismatched
//! key/token pair (see [`TokenVault::save`]).

pub mod error;
pub mod holder;
pub mod key;
pub mod locator;
pub mod vault;

pub use error::VaultError;
pub use holder::TokenHolder;
pub use key::KeyMaterial;
pub use locator::KeyLocator;
pub use vault::TokenVault;
