//! Axum integration of slug route matching
//!
//! [`slug_route_layer`] runs path matching for every request and leaves the
//! outcome in the request extensions for downstream handlers:
//! - [`ResolvedLocale`] when a route class matched the path structurally
//! - [`MatchedRoute`] when an entity was found behind the path

use crate::core::error::RoutingError;
use crate::routing::provider::RouteProvider;
use crate::routing::request::RouteRequest;
use crate::routing::route::RouteDescriptor;
use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Route resolved from the request path
#[derive(Debug, Clone)]
pub struct MatchedRoute(pub RouteDescriptor);

/// Locale resolved from the request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Middleware resolving the request path into a route
///
/// Use with `axum::middleware::from_fn_with_state(provider, slug_route_layer)`.
/// Repository or locale provider failures short-circuit into an error
/// response; a path nobody claims simply passes through.
pub async fn slug_route_layer(
    State(provider): State<Arc<dyn RouteProvider>>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut route_request = RouteRequest::new(request.uri().path());

    let matched = match provider
        .get_route_collection_for_request(&mut route_request)
        .await
    {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!(path = %request.uri().path(), error = %e, "slug route matching failed");
            return e.into_response();
        }
    };

    if let Some(locale) = route_request.locale() {
        request
            .extensions_mut()
            .insert(ResolvedLocale(locale.to_string()));
    }
    if let Some(route) = matched.routes.first() {
        request
            .extensions_mut()
            .insert(MatchedRoute(route.clone()));
    }

    next.run(request).await
}

/// Fallback handler rendering the matched route as JSON
///
/// Answers 404 when the middleware found no route.
pub async fn render_matched_route(request: Request) -> Response {
    match request.extensions().get::<MatchedRoute>() {
        Some(MatchedRoute(route)) => Json(route).into_response(),
        None => RoutingError::not_found(request.uri().path()).into_response(),
    }
}
