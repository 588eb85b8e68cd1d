//! Server module for building HTTP servers with slug routing
//!
//! This module provides a `ServerBuilder` that wires:
//! - the routing configuration and per-class repositories
//! - the slug route middleware resolving every request path
//! - a fallback rendering the matched route

pub mod builder;
pub mod middleware;

pub use builder::ServerBuilder;
pub use middleware::{MatchedRoute, ResolvedLocale, render_matched_route, slug_route_layer};
