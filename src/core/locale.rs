//! Locale collaborators: the set of supported locales and the current one

use anyhow::Result;
use async_trait::async_trait;

/// Source of the locales the storefront is available in
///
/// The route resolver reads `locales()` once and keeps the list for its
/// whole lifetime.
#[async_trait]
pub trait LocaleProvider: Send + Sync {
    /// All supported locale codes (e.g., `["en", "fr", "de_CH"]`)
    async fn locales(&self) -> Result<Vec<String>>;

    /// Locale used when a request path carries no locale segment
    fn default_locale(&self) -> &str;
}

/// Current request/session locale
pub trait LocaleContext: Send + Sync {
    fn locale(&self) -> String;
}

/// Locale provider backed by a fixed list
#[derive(Debug, Clone)]
pub struct StaticLocaleProvider {
    locales: Vec<String>,
    default_locale: String,
}

impl StaticLocaleProvider {
    /// Create a provider; the default locale is added to the list if absent
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default_locale = default_locale.into();
        let mut locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        if !locales.contains(&default_locale) {
            locales.push(default_locale.clone());
        }
        Self {
            locales,
            default_locale,
        }
    }
}

#[async_trait]
impl LocaleProvider for StaticLocaleProvider {
    async fn locales(&self) -> Result<Vec<String>> {
        Ok(self.locales.clone())
    }

    fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

/// Locale context that always answers the same locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocaleContext(String);

impl FixedLocaleContext {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }
}

impl LocaleContext for FixedLocaleContext {
    fn locale(&self) -> String {
        self.0.clone()
    }
}
