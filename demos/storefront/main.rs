//! Storefront example: slug routes for products and taxons
//!
//! Seeds in-memory catalogs, prints a few resolved routes and serves them:
//! - GET /en/products/red-shirt       - product route as JSON
//! - GET /fr/taxons/t-shirts.json     - taxon route with `_format = json`
//! - GET /sitemap                     - every route the storefront publishes

use axum::response::IntoResponse;
use std::sync::Arc;
use storefront::prelude::*;
use tracing_subscriber::EnvFilter;

impl_route_entity!(Product, "product", {
    name: String,
    slug: String,
});

impl_route_entity!(Taxon, "taxon", {
    name: String,
    code: String,
});

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,storefront=debug")),
        )
        .init();

    let config = RoutingConfig::from_yaml_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/config/routing.yaml"
    ))?;

    let products = InMemoryRepository::new();
    for (name, slug) in [
        ("Red shirt", "red-shirt"),
        ("Blue jeans", "blue-jeans"),
        ("Coffee mug", "coffee-mug"),
    ] {
        products.insert(Product::new(name.to_string(), slug.to_string()))?;
    }

    let taxons = InMemoryRepository::new();
    for (name, code) in [("T-shirts", "t-shirts"), ("Accessories", "accessories")] {
        taxons.insert(Taxon::new(name.to_string(), code.to_string()))?;
    }

    let locales = StaticLocaleProvider::new(["en", "fr", "de"], "en");

    let provider = Arc::new(
        SlugRouteProvider::builder(config.clone())
            .register_repository("product", Arc::new(products.clone()))?
            .register_repository("taxon", Arc::new(taxons.clone()))?
            .with_locale_provider(Arc::new(locales.clone()))
            .build()?,
    );

    println!("🔍 Route resolution:\n");
    let route = provider.get_route_by_name(&"red-shirt".into()).await?;
    println!("  red-shirt  → {}", route.generate_path());
    let route = provider.get_route_by_name(&"accessories".into()).await?;
    println!("  accessories → {}", route.generate_path());
    let mut request = RouteRequest::new("/de/products/coffee-mug.json");
    let matched = provider.get_route_collection_for_request(&mut request).await?;
    if let Some(route) = matched.routes.first() {
        println!(
            "  {} → {} (locale {}, format {:?})",
            request.path(),
            route.entity().entity_class(),
            route.locale(),
            route.format()
        );
    }

    let sitemap_provider = provider.clone();
    let sitemap = Router::new().route(
        "/sitemap",
        get(move || {
            let provider = sitemap_provider.clone();
            async move {
                match provider.route_collection().await {
                    Ok(routes) => {
                        let paths: Vec<String> =
                            routes.iter().map(|(_, r)| r.generate_path()).collect();
                        axum::Json(paths).into_response()
                    }
                    Err(e) => e.into_response(),
                }
            }
        }),
    );

    println!("\n🌐 Server running on http://127.0.0.1:3000");

    ServerBuilder::new()
        .with_config(config)
        .register_repository("product", products)
        .register_repository("taxon", taxons)
        .with_locale_provider(locales)
        .with_custom_routes(sitemap)
        .serve("127.0.0.1:3000")
        .await
}
