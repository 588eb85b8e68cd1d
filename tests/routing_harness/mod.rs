//! Shared test harness for slug routing tests
//!
//! Provides `Product` (routed by `slug` under `/products`), `Taxon` (routed
//! by `code` under `/taxons`) and `Brand` (no route configuration), plus
//! collaborators that count or fail their calls.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod routing_harness;
//! use routing_harness::*;
//! ```

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use storefront::prelude::*;

impl_route_entity!(
    Product,
    "product",
    {
        name: String,
        slug: String,
    }
);

impl_route_entity!(
    Taxon,
    "taxon",
    {
        name: String,
        code: String,
    }
);

impl_route_entity!(
    Brand,
    "brand",
    {
        name: String,
        slug: String,
    }
);

pub fn product(slug: &str) -> Product {
    Product::new(format!("Product {}", slug), slug.to_string())
}

pub fn taxon(code: &str) -> Taxon {
    Taxon::new(format!("Taxon {}", code), code.to_string())
}

/// `product` by `slug` under `/products`, `taxon` by `code` under `/taxons`
pub fn routing_config() -> RoutingConfig {
    RoutingConfig::default()
        .with_route("product", RouteConfig::new("slug", "/products"))
        .with_route("taxon", RouteConfig::new("code", "/taxons/"))
}

pub fn product_repository(slugs: &[&str]) -> InMemoryRepository {
    let repository = InMemoryRepository::new();
    for slug in slugs {
        repository.insert(product(slug)).unwrap();
    }
    repository
}

pub fn taxon_repository(codes: &[&str]) -> InMemoryRepository {
    let repository = InMemoryRepository::new();
    for code in codes {
        repository.insert(taxon(code)).unwrap();
    }
    repository
}

// ---------------------------------------------------------------------------
// Counting / failing collaborators
// ---------------------------------------------------------------------------

/// Repository wrapper counting lookups
#[derive(Clone)]
pub struct CountingRepository {
    inner: InMemoryRepository,
    calls: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn new(inner: InMemoryRepository) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityRepository for CountingRepository {
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<EntityRef>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_one_by(field, value).await
    }

    async fn find_by(
        &self,
        criteria: &FindCriteria,
        order: Option<&SortOrder>,
        limit: Option<usize>,
    ) -> Result<Vec<EntityRef>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by(criteria, order, limit).await
    }
}

/// Repository whose every query fails
pub struct FailingRepository;

#[async_trait]
impl EntityRepository for FailingRepository {
    async fn find_one_by(&self, _field: &str, _value: &str) -> Result<Option<EntityRef>> {
        Err(anyhow!("connection refused"))
    }

    async fn find_by(
        &self,
        _criteria: &FindCriteria,
        _order: Option<&SortOrder>,
        _limit: Option<usize>,
    ) -> Result<Vec<EntityRef>> {
        Err(anyhow!("connection refused"))
    }
}

/// Locale provider counting `locales()` calls
#[derive(Clone)]
pub struct CountingLocaleProvider {
    inner: StaticLocaleProvider,
    calls: Arc<AtomicUsize>,
}

impl CountingLocaleProvider {
    pub fn new(locales: &[&str], default_locale: &str) -> Self {
        Self {
            inner: StaticLocaleProvider::new(locales.iter().copied(), default_locale),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocaleProvider for CountingLocaleProvider {
    async fn locales(&self) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.locales().await
    }

    fn default_locale(&self) -> &str {
        self.inner.default_locale()
    }
}

// ---------------------------------------------------------------------------
// Provider factories
// ---------------------------------------------------------------------------

pub fn locales() -> Arc<StaticLocaleProvider> {
    Arc::new(StaticLocaleProvider::new(["en", "fr"], "en"))
}

/// Provider over `product` then `taxon`, locales `en` (default) and `fr`
pub fn build_provider(
    config: RoutingConfig,
    products: impl EntityRepository + 'static,
    taxons: impl EntityRepository + 'static,
) -> SlugRouteProvider {
    SlugRouteProvider::builder(config)
        .register_repository("product", Arc::new(products))
        .unwrap()
        .register_repository("taxon", Arc::new(taxons))
        .unwrap()
        .with_locale_provider(locales())
        .build()
        .unwrap()
}

/// Default provider seeded with the given product slugs and taxon codes
pub fn seeded_provider(slugs: &[&str], codes: &[&str]) -> SlugRouteProvider {
    build_provider(
        routing_config(),
        product_repository(slugs),
        taxon_repository(codes),
    )
}
