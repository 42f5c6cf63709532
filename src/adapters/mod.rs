//! External system integrations for itemsync.
//!
//! - [`upstream`] - the item-by-ID HTTP API records are pulled from
//!
//! Adapters isolate third-party clients behind traits so the core can be
//! exercised against in-memory implementations.

pub mod upstream;
