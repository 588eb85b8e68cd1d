//! Slug route provider
//!
//! Translates between human-readable URL slugs and persisted entities:
//! - outbound, a name (slug) or an entity becomes a [`RouteDescriptor`]
//! - inbound, a request path becomes the matching routes plus a locale
//!
//! Classes are tried in registration order and the first hit wins, so a slug
//! shared by two classes always resolves to the class registered first.

use crate::config::{RouteConfig, RoutingConfig};
use crate::core::entity::EntityRef;
use crate::core::error::{RouteError, RoutingError, RoutingResult, StorageError};
use crate::core::locale::{FixedLocaleContext, LocaleContext, LocaleProvider};
use crate::core::repository::EntityRepository;
use crate::routing::request::{RouteMatch, RouteRequest};
use crate::routing::route::{RouteCollection, RouteDefaults, RouteDescriptor, RouteName};
use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

/// Routing capability consumed by the HTTP layer
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolve one entity or slug
    ///
    /// Fails with [`RouteError::NotFound`] when no class yields a match.
    async fn get_route_by_name(&self, name: &RouteName) -> RoutingResult<RouteDescriptor>;

    /// Resolve several names, or every route when `names` is `None`
    ///
    /// Names that resolve to nothing are dropped.
    async fn get_routes_by_names(
        &self,
        names: Option<&[RouteName]>,
    ) -> RoutingResult<Vec<RouteDescriptor>>;

    /// Match an inbound request path
    ///
    /// When a class pattern matched, the request locale is updated.
    async fn get_route_collection_for_request(
        &self,
        request: &mut RouteRequest,
    ) -> RoutingResult<RouteMatch>;
}

/// Compiled path pattern of one class
#[derive(Debug)]
struct ClassMatcher {
    class: String,
    pattern: Regex,
}

/// Route provider resolving slugs through per-class repositories
pub struct SlugRouteProvider {
    config: Arc<RoutingConfig>,
    repositories: IndexMap<String, Arc<dyn EntityRepository>>,
    locale_provider: Arc<dyn LocaleProvider>,
    locale_context: Arc<dyn LocaleContext>,
    /// Built from the locale list on first use and kept for the provider's lifetime
    matchers: OnceCell<Vec<ClassMatcher>>,
}

impl SlugRouteProvider {
    pub fn builder(config: RoutingConfig) -> SlugRouteProviderBuilder {
        SlugRouteProviderBuilder::new(config)
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Registered classes in resolution order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }

    /// Every route of every registered class, keyed by field value
    ///
    /// At most `route_collection_limit` entities are read per class. A later
    /// route under an existing key replaces the earlier one.
    pub async fn route_collection(&self) -> RoutingResult<RouteCollection> {
        let limit = self.config.collection_limit();
        let mut collection = RouteCollection::new();

        for (class, repository) in &self.repositories {
            let route = self.route_config(class)?;
            let entities = repository
                .find_all(limit)
                .await
                .map_err(|source| repository_error(class, source))?;

            for entity in entities {
                match self.create_route(route, &entity, None, None, None) {
                    Ok(descriptor) => {
                        collection.add(descriptor.value().to_string(), descriptor);
                    }
                    Err(RoutingError::Route(RouteError::MissingField { class, field })) => {
                        tracing::warn!(
                            class = %class,
                            field = %field,
                            id = %entity.id(),
                            "skipping entity without route value"
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(collection)
    }

    async fn find_route_by_value(&self, name: &str) -> RoutingResult<RouteDescriptor> {
        for (class, repository) in &self.repositories {
            let route = self.route_config(class)?;
            if let Some(entity) = find_one(class, repository.as_ref(), &route.field, name).await? {
                return self.create_route(route, &entity, None, None, None);
            }
        }

        Err(RoutingError::not_found(name))
    }

    /// Look up the entity behind a matched path value
    ///
    /// The format suffix is stripped before the lookup; when the stripped
    /// value finds nothing, the raw value is tried as a slug of its own.
    async fn match_value(
        &self,
        class: &str,
        raw: &str,
        locale: &str,
    ) -> RoutingResult<Option<RouteDescriptor>> {
        let route = self.route_config(class)?;
        let repository = self.repository(class)?;
        let (value, format) = split_format(raw);

        if let Some(entity) = find_one(class, repository, &route.field, value).await? {
            return self
                .create_route(route, &entity, Some(value), Some(locale), format)
                .map(Some);
        }

        if format.is_some() {
            if let Some(entity) = find_one(class, repository, &route.field, raw).await? {
                return self
                    .create_route(route, &entity, Some(raw), Some(locale), None)
                    .map(Some);
            }
        }

        Ok(None)
    }

    fn create_route(
        &self,
        route: &RouteConfig,
        entity: &EntityRef,
        value: Option<&str>,
        locale: Option<&str>,
        format: Option<&str>,
    ) -> RoutingResult<RouteDescriptor> {
        let value = match value {
            Some(value) => value.to_string(),
            None => entity.route_value(&route.field).ok_or_else(|| {
                RoutingError::Route(RouteError::MissingField {
                    class: entity.entity_class().to_string(),
                    field: route.field.clone(),
                })
            })?,
        };
        let locale = match locale {
            Some(locale) => locale.to_string(),
            None => self.locale_context.locale(),
        };
        let format = format.filter(|f| !f.is_empty()).map(str::to_string);

        Ok(RouteDescriptor {
            static_prefix: route.static_prefix(),
            variable_pattern: format!("/{}", value),
            add_format_pattern: format.is_some(),
            add_locale_pattern: true,
            defaults: RouteDefaults {
                entity: entity.clone(),
                field: route.field.clone(),
                value,
                locale,
                format,
            },
        })
    }

    async fn matchers(&self) -> RoutingResult<&[ClassMatcher]> {
        let matchers = self
            .matchers
            .get_or_try_init(|| self.compile_matchers())
            .await?;
        Ok(matchers.as_slice())
    }

    async fn compile_matchers(&self) -> RoutingResult<Vec<ClassMatcher>> {
        let locales = self
            .locale_provider
            .locales()
            .await
            .map_err(|source| StorageError::LocaleProvider { source })?;
        tracing::debug!(locales = ?locales, "compiling slug route matchers");

        self.repositories
            .keys()
            .map(|class| -> RoutingResult<ClassMatcher> {
                let route = self.route_config(class)?;
                let pattern = path_pattern(&locales, route).map_err(|e| {
                    RoutingError::Route(RouteError::InvalidPattern {
                        class: class.clone(),
                        message: e.to_string(),
                    })
                })?;
                Ok(ClassMatcher {
                    class: class.clone(),
                    pattern,
                })
            })
            .collect()
    }

    fn route_config(&self, class: &str) -> RoutingResult<&RouteConfig> {
        self.config.route_for(class).ok_or_else(|| {
            RoutingError::invalid_argument(format!("no route configuration for class '{}'", class))
        })
    }

    fn repository(&self, class: &str) -> RoutingResult<&dyn EntityRepository> {
        self.repositories
            .get(class)
            .map(|repository| repository.as_ref())
            .ok_or_else(|| {
                RoutingError::invalid_argument(format!("no repository registered for class '{}'", class))
            })
    }
}

#[async_trait]
impl RouteProvider for SlugRouteProvider {
    async fn get_route_by_name(&self, name: &RouteName) -> RoutingResult<RouteDescriptor> {
        match name {
            RouteName::Entity(entity) => match self.config.route_for(entity.entity_class()) {
                Some(route) => self.create_route(route, entity, None, None, None),
                None => Err(RoutingError::not_found(name.to_string())),
            },
            RouteName::Name(value) => self.find_route_by_value(value).await,
        }
    }

    async fn get_routes_by_names(
        &self,
        names: Option<&[RouteName]>,
    ) -> RoutingResult<Vec<RouteDescriptor>> {
        let Some(names) = names else {
            return Ok(self.route_collection().await?.into_routes());
        };

        let mut routes = Vec::with_capacity(names.len());
        for name in names {
            match self.get_route_by_name(name).await {
                Ok(route) => routes.push(route),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(name = %name, "dropping unresolved route name");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(routes)
    }

    async fn get_route_collection_for_request(
        &self,
        request: &mut RouteRequest,
    ) -> RoutingResult<RouteMatch> {
        let mut matched = RouteMatch::default();
        if request.path().is_empty() {
            return Ok(matched);
        }
        let path = request.path().to_string();

        for matcher in self.matchers().await? {
            let Some(captures) = matcher.pattern.captures(&path) else {
                continue;
            };

            let locale = captures
                .name("locale")
                .map(|m| m.as_str())
                .filter(|locale| !locale.is_empty())
                .unwrap_or_else(|| self.locale_provider.default_locale())
                .to_string();
            matched.locale = Some(locale.clone());

            let raw = captures.name("value").map_or("", |m| m.as_str());
            if raw.is_empty() {
                continue;
            }

            match self.match_value(&matcher.class, raw, &locale).await? {
                Some(route) => {
                    tracing::debug!(class = %matcher.class, value = raw, locale = %locale, "path matched");
                    matched.routes.add(raw, route);
                }
                None => {
                    tracing::debug!(class = %matcher.class, value = raw, "no entity for path value");
                }
            }
        }

        if let Some(locale) = &matched.locale {
            request.set_locale(locale.clone());
        }

        Ok(matched)
    }
}

/// Builder for [`SlugRouteProvider`]
///
/// All repositories are registered here; `build()` hands out a provider
/// that can no longer change, so resolution never races registration.
///
/// # Example
///
/// ```rust,ignore
/// let provider = SlugRouteProvider::builder(config)
///     .register_repository("product", Arc::new(products))?
///     .register_repository("taxon", Arc::new(taxons))?
///     .with_locale_provider(Arc::new(StaticLocaleProvider::new(["en", "fr"], "en")))
///     .build()?;
/// ```
pub struct SlugRouteProviderBuilder {
    config: RoutingConfig,
    repositories: IndexMap<String, Arc<dyn EntityRepository>>,
    locale_provider: Option<Arc<dyn LocaleProvider>>,
    locale_context: Option<Arc<dyn LocaleContext>>,
}

impl SlugRouteProviderBuilder {
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            config,
            repositories: IndexMap::new(),
            locale_provider: None,
            locale_context: None,
        }
    }

    /// Associate a class with its repository
    ///
    /// Registering a class again replaces its repository but keeps its
    /// position in the resolution order. The class must have a route
    /// configuration.
    pub fn register_repository(
        mut self,
        class: impl Into<String>,
        repository: Arc<dyn EntityRepository>,
    ) -> RoutingResult<Self> {
        let class = class.into();
        if self.config.route_for(&class).is_none() {
            return Err(RoutingError::invalid_argument(format!(
                "cannot register a repository for '{}': class has no route configuration",
                class
            )));
        }
        tracing::debug!(class = %class, "registering slug route repository");
        self.repositories.insert(class, repository);
        Ok(self)
    }

    /// Set the locale provider (required)
    pub fn with_locale_provider(mut self, provider: Arc<dyn LocaleProvider>) -> Self {
        self.locale_provider = Some(provider);
        self
    }

    /// Set the locale context
    ///
    /// Defaults to a context fixed on the provider's default locale.
    pub fn with_locale_context(mut self, context: Arc<dyn LocaleContext>) -> Self {
        self.locale_context = Some(context);
        self
    }

    pub fn build(self) -> RoutingResult<SlugRouteProvider> {
        let locale_provider = self.locale_provider.ok_or_else(|| {
            RoutingError::invalid_argument("LocaleProvider is required. Call .with_locale_provider()")
        })?;
        let locale_context = self.locale_context.unwrap_or_else(|| {
            Arc::new(FixedLocaleContext::new(locale_provider.default_locale()))
        });

        Ok(SlugRouteProvider {
            config: Arc::new(self.config),
            repositories: self.repositories,
            locale_provider,
            locale_context,
            matchers: OnceCell::new(),
        })
    }
}

async fn find_one(
    class: &str,
    repository: &dyn EntityRepository,
    field: &str,
    value: &str,
) -> RoutingResult<Option<EntityRef>> {
    repository
        .find_one_by(field, value)
        .await
        .map_err(|source| repository_error(class, source))
}

fn repository_error(class: &str, source: anyhow::Error) -> RoutingError {
    RoutingError::Storage(StorageError::Repository {
        class: class.to_string(),
        source,
    })
}

/// `^/(?:(<locales>)/)?<prefix>/?(<value>)/?$`
fn path_pattern(locales: &[String], route: &RouteConfig) -> Result<Regex, regex::Error> {
    let locale_group = if locales.is_empty() {
        String::new()
    } else {
        let alternatives: Vec<String> = locales.iter().map(|l| regex::escape(l)).collect();
        format!("(?:(?P<locale>{})/)?", alternatives.join("|"))
    };
    let prefix = regex::escape(route.trimmed_prefix());
    Regex::new(&format!(
        "^/{}{}/?(?P<value>[^/].*?)/?$",
        locale_group, prefix
    ))
}

/// Split a trailing `.<ext>` off a path value
fn split_format(value: &str) -> (&str, Option<&str>) {
    static FORMAT_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let regex = FORMAT_SUFFIX.get_or_init(|| Regex::new(r"(?i)^.+\.([a-z]+)$").unwrap());

    match regex.captures(value).and_then(|c| c.get(1)) {
        Some(ext) => (&value[..ext.start() - 1], Some(ext.as_str())),
        None => (value, None),
    }
}
