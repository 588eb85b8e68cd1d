//! The view of an inbound request the resolver reads and updates

use crate::routing::route::{LOCALE_PARAM, RouteCollection};
use std::collections::HashMap;

/// Inbound request as seen by path matching
///
/// Matching reads the path and, when a route class matched, writes the
/// resolved locale back (both the request locale and the `_locale`
/// attribute).
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    path: String,
    locale: Option<String>,
    attributes: HashMap<String, String>,
}

impl RouteRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Set the request locale and the `_locale` attribute
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.attributes
            .insert(LOCALE_PARAM.to_string(), locale.clone());
        self.locale = Some(locale);
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}

/// Result of matching a request path
#[derive(Debug, Clone, Default)]
pub struct RouteMatch {
    /// Matched routes keyed by the path value
    pub routes: RouteCollection,
    /// Locale of the last class whose pattern matched, if any
    pub locale: Option<String>,
}

impl RouteMatch {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
