//! Typed asynchronous client for the Are.na API.
//!
//! # Overview
//! Covers users, groups, channels, blocks, connections, comments and
//! search. The client never performs network I/O itself: every request is
//! handed to an injected `Transport`, so the same core runs against any HTTP
//! stack and is fully deterministic under test.
//!
//! # Design
//! - `ArenaClient` holds only immutable configuration and is safe to share
//!   between concurrent operations.
//! - Resource accessors (`client.channel(slug)`, `client.block(id)`, ...)
//!   bind an identifier and expose the verbs for that resource; nothing is
//!   sent until an operation is awaited.
//! - Non-2xx responses become `ApiError::Http` with the status and reason
//!   phrase. There is no retry, caching or rate limiting.
//! - The cache-busting `date` parameter reads an injectable `Clock`.
//!
//! ```no_run
//! # async fn demo(transport: impl arena_core::Transport) -> Result<(), arena_core::ApiError> {
//! use arena_core::{ArenaClient, ClientConfig, Pagination};
//!
//! let client = ArenaClient::with_config(ClientConfig::from_env(), transport);
//! let channel = client
//!     .channel("arena-influences")
//!     .get(Some(&Pagination::new().per(10)))
//!     .await?;
//! for item in channel.items() {
//!     if let Some(block) = item.as_block() {
//!         println!("{} at {}", block.display_title(), item.connection.position);
//!     }
//! }
//! # Ok(()) }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::ArenaClient;
pub use clock::{Clock, SystemClock};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use query::{Direction, Pagination};
pub use types::*;
