//! Slug route resolution
//!
//! - [`route`]: route descriptors, default parameters and collections
//! - [`request`]: the request view read and updated by path matching
//! - [`provider`]: the resolver itself

pub mod provider;
pub mod request;
pub mod route;

pub use provider::{RouteProvider, SlugRouteProvider, SlugRouteProviderBuilder};
pub use request::{RouteMatch, RouteRequest};
pub use route::{
    ENTITY_PARAM, FORMAT_PARAM, LOCALE_PARAM, RouteCollection, RouteDefaults, RouteDescriptor,
    RouteName,
};
