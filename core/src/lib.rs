//! Synchronous client core for a JSON user directory service.
//!
//! # Overview
//! Creates, reads, updates and deletes users over HTTP, and runs two derived
//! workflows: saving the comments of a user's latest post to a JSON file, and
//! listing a user's open todos.
//!
//! # Design
//! - `UserApi` is stateless: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. All decoding policy lives there.
//! - `Transport` executes requests. `UreqTransport` is the blocking default;
//!   tests inject scripted transports.
//! - `UserClient` owns one `UserApi` and one transport and holds no other
//!   state, so it can be shared across threads when the transport can.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod workflows;

pub use api::UserApi;
pub use client::UserClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Comment, NewUser, Post, Todo, User};
pub use workflows::CommentsExport;
