//! HTTP client for the Inkwell notes backend.
//!
//! This crate provides:
//! - an [ApiClient] with a middleware pipeline around a selectable transport
//! - typed endpoint groups in [api] for users, notes, collections and feeds
//! - canned [fixtures] served instead of the network in development
//! - a small [storage] abstraction for persisted client state
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use inkwell_client::{ApiClient, ClientConfig, MemoryStorage, TransportMode};
//!
//! let config = ClientConfig::new("http://localhost:3000/api")
//!     .with_mode(TransportMode::from_flags(dev, use_mock));
//! let client = ApiClient::new(config, Arc::new(MemoryStorage::new()))?;
//! let hot = client.explore().hot_notes().await?;
//! ```

pub mod api;
mod client;
mod config;
mod error;
pub mod fixtures;
pub mod middleware;
pub mod storage;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, TransportMode};
pub use error::{ApiError, payload_is_present};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, THEME_KEY, TOKEN_KEY};
