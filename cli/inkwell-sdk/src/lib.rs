//! Application state for Inkwell front ends.
//!
//! The stores in this crate are explicit containers owned by the
//! application root. They publish their state through
//! [tokio::sync::watch] channels and are mutated only through their action
//! methods.

pub mod appearance;
pub mod router;
pub mod session;
pub mod theme;

pub use inkwell_client as client;
