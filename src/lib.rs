//! # Storefront Routing
//!
//! Slug-based routing for storefront entities in Rust.
//!
//! ## Features
//!
//! - **Slug Resolution**: Turn `/en/products/red-shirt` into the product behind it
//! - **Reverse Routing**: Turn an entity back into a route with its default parameters
//! - **Per-Class Configuration**: Route field and URL prefix per entity class, in YAML
//! - **Locale Aware**: Optional locale segment, validated against the supported locales
//! - **Format Suffixes**: `/products/red-shirt.json` resolves with `_format = json`
//! - **Axum Integration**: Middleware exposing the matched route to handlers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! impl_route_entity!(
//!     Product,
//!     "product",
//!     {
//!         name: String,
//!         slug: String,
//!     }
//! );
//!
//! let products = InMemoryRepository::new();
//! products.insert(Product::new("Red shirt".to_string(), "red-shirt".to_string()))?;
//!
//! let config = RoutingConfig::default()
//!     .with_route("product", RouteConfig::new("slug", "/products"));
//!
//! let provider = SlugRouteProvider::builder(config)
//!     .register_repository("product", Arc::new(products))?
//!     .with_locale_provider(Arc::new(StaticLocaleProvider::new(["en", "fr"], "en")))
//!     .build()?;
//!
//! let route = provider.get_route_by_name(&"red-shirt".into()).await?;
//! assert_eq!(route.generate_path(), "/en/products/red-shirt");
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod promotion;
pub mod routing;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, EntityRef},
        error::{ConfigError, RouteError, RoutingError, RoutingResult, StorageError},
        field::FieldValue,
        locale::{FixedLocaleContext, LocaleContext, LocaleProvider, StaticLocaleProvider},
        query::{FindCriteria, SortDirection, SortOrder},
        repository::EntityRepository,
    };

    // === Macros ===
    pub use crate::impl_route_entity;

    // === Routing ===
    pub use crate::routing::{
        RouteCollection, RouteDefaults, RouteDescriptor, RouteMatch, RouteName, RouteProvider,
        RouteRequest, SlugRouteProvider, SlugRouteProviderBuilder,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::{RouteConfig, RoutingConfig};

    // === Server ===
    pub use crate::server::{MatchedRoute, ResolvedLocale, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Extension, Router,
        extract::{Path, State},
        routing::get,
    };
}
