//! Shared contracts for orgkit: the secret-entry capability used by the CLI
//! and the vault. This crate is intentionally small to keep dependency
//! surface minimal.

pub mod secret;
