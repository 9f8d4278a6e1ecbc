//! HTTP delivery for MarketPulse
//!
//! This crate serves the consolidated snapshot document over HTTP with
//! unified lifecycle management and graceful shutdown.
//!
//! # Architecture
//!
//! The single [`HttpServer`] implements the [`Server`] trait, which
//! provides a consistent interface for running and monitoring servers.
//! The [`ServerExt`] trait provides convenience methods like `spawn()` and
//! `run_with_ctrl_c()`.
//!
//! Shutdown coordination uses `CancellationToken` from `tokio_util`,
//! allowing hierarchical shutdown where cancelling a parent token
//! automatically cancels all child tokens.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{routes, HttpServer, ServerConfig, ServerExt, SnapshotState, HealthState};
//! use std::sync::Arc;
//!
//! let router = routes::router(
//!     Arc::new(SnapshotState::new(aggregator)),
//!     Arc::new(HealthState::new("pulse")),
//! );
//! let server = HttpServer::new(ServerConfig::default(), router);
//! server.run_with_ctrl_c().await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - server binding configuration
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`routes`] / [`handlers`] - the snapshot API surface
//! - [`health`] - health check endpoint
//! - [`shutdown`] - graceful shutdown utilities

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod http;
pub mod routes;
pub mod shutdown;
pub mod traits;

pub use config::{ServerConfig, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use handlers::SnapshotState;
pub use health::HealthState;
pub use http::HttpServer;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
