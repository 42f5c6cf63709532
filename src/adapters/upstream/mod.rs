//! Upstream item API adapter
//!
//! [`ItemSource`] is the seam between the core and the network;
//! [`HttpItemSource`] is the production implementation.

pub mod client;
pub mod source;

pub use client::HttpItemSource;
pub use source::ItemSource;
