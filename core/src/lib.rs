//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TodoApp` layers the
//! user-visible operations on top: it drives a host-supplied `Transport`
//! and reports every outcome to a host-supplied `Ui`.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoApp` is the only layer that swallows errors, turning them into UI
//!   signals plus `log` records.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use app::{TodoApp, Ui};
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{Health, NewTodo, Stats, Todo};
pub use view::{BackendStatus, ListView};
