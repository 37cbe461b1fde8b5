//! Fake lighting filter core.
//!
//! This crate owns the per-frame render pipeline of the mixed reality fake
//! lighting filter and the thin registration glue around it. The compositing
//! host is reached only through the capability traits in [`host`].

pub mod error;
pub mod filter;
pub mod host;
pub mod locale;
pub mod logging;
pub mod module;
pub mod properties;
pub mod render;
pub mod settings;
