//! Transport adapter implementations.
//!
//! This module contains the concrete bindings of the [`Transport`] trait:
//!
//! - `chunked_http` - chunked POST body binding (production)
//! - `event_push` - server-push SSE binding (production)
//! - `mock` - scripted transport for testing
//!
//! [`Transport`]: crate::traits::Transport

pub mod chunked_http;
pub mod event_push;
pub mod mock;

pub use chunked_http::ChunkedHttpTransport;
pub use event_push::PushEventTransport;
pub use mock::{MockStream, MockTransport};
