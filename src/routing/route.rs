//! Route descriptors produced by the slug resolver

use crate::core::entity::EntityRef;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Default parameter holding a reference to the resolved entity
pub const ENTITY_PARAM: &str = "_entity";
/// Default parameter holding the locale
pub const LOCALE_PARAM: &str = "_locale";
/// Default parameter holding the request format
pub const FORMAT_PARAM: &str = "_format";

/// What to resolve: an entity instance or an opaque name (a slug)
#[derive(Debug, Clone)]
pub enum RouteName {
    Entity(EntityRef),
    Name(String),
}

impl From<EntityRef> for RouteName {
    fn from(entity: EntityRef) -> Self {
        RouteName::Entity(entity)
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        RouteName::Name(name)
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        RouteName::Name(name.to_string())
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteName::Entity(entity) => write!(f, "{}#{}", entity.entity_class(), entity.id()),
            RouteName::Name(name) => f.write_str(name),
        }
    }
}

/// Default parameters of a resolved route
#[derive(Debug, Clone)]
pub struct RouteDefaults {
    /// The resolved entity
    pub entity: EntityRef,
    /// Name of the configured route field
    pub field: String,
    /// Value of the route field as it appears in the path
    pub value: String,
    pub locale: String,
    pub format: Option<String>,
}

impl RouteDefaults {
    /// The default-parameter map
    ///
    /// Always holds the entity reference, `{field: value}` and `_locale`;
    /// `_format` only when a format is set.
    pub fn parameters(&self) -> IndexMap<String, Value> {
        let mut params = IndexMap::new();
        params.insert(
            ENTITY_PARAM.to_string(),
            serde_json::json!({
                "class": self.entity.entity_class(),
                "id": self.entity.id(),
            }),
        );
        params.insert(self.field.clone(), Value::String(self.value.clone()));
        params.insert(LOCALE_PARAM.to_string(), Value::String(self.locale.clone()));
        if let Some(format) = &self.format {
            params.insert(FORMAT_PARAM.to_string(), Value::String(format.clone()));
        }
        params
    }
}

impl Serialize for RouteDefaults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.parameters().serialize(serializer)
    }
}

/// Routable descriptor for one entity
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// `/` followed by the configured prefix without surrounding slashes
    pub static_prefix: String,
    /// `/` followed by the value; the value is inserted as is
    pub variable_pattern: String,
    pub defaults: RouteDefaults,
    /// A `.{_format}` suffix belongs to the full pattern
    pub add_format_pattern: bool,
    /// A `/{_locale}` segment belongs to the full pattern
    pub add_locale_pattern: bool,
}

impl RouteDescriptor {
    pub fn entity(&self) -> &EntityRef {
        &self.defaults.entity
    }

    pub fn value(&self) -> &str {
        &self.defaults.value
    }

    pub fn locale(&self) -> &str {
        &self.defaults.locale
    }

    pub fn format(&self) -> Option<&str> {
        self.defaults.format.as_deref()
    }

    /// The full path pattern with placeholders
    ///
    /// e.g. `/{_locale}/products/red-shirt.{_format}`
    pub fn path_pattern(&self) -> String {
        let mut pattern = String::new();
        if self.add_locale_pattern {
            pattern.push_str("/{_locale}");
        }
        pattern.push_str(&self.body());
        if self.add_format_pattern {
            pattern.push_str(".{_format}");
        }
        pattern
    }

    /// Render the path from the defaults
    ///
    /// e.g. `/en/products/red-shirt.json`
    pub fn generate_path(&self) -> String {
        let mut path = String::new();
        if self.add_locale_pattern {
            path.push('/');
            path.push_str(&self.defaults.locale);
        }
        path.push_str(&self.body());
        if let Some(format) = self.format().filter(|_| self.add_format_pattern) {
            let suffix = format!(".{}", format);
            if !path.ends_with(&suffix) {
                path.push_str(&suffix);
            }
        }
        path
    }

    fn body(&self) -> String {
        format!(
            "{}{}",
            self.static_prefix.trim_end_matches('/'),
            self.variable_pattern
        )
    }
}

impl Serialize for RouteDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RouteDescriptor", 6)?;
        state.serialize_field("path", &self.generate_path())?;
        state.serialize_field("static_prefix", &self.static_prefix)?;
        state.serialize_field("variable_pattern", &self.variable_pattern)?;
        state.serialize_field("defaults", &self.defaults)?;
        state.serialize_field("add_format_pattern", &self.add_format_pattern)?;
        state.serialize_field("add_locale_pattern", &self.add_locale_pattern)?;
        state.end()
    }
}

/// Ordered routes keyed by name
///
/// Adding a route under an existing name replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: IndexMap<String, RouteDescriptor>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, route: RouteDescriptor) {
        self.routes.insert(name.into(), route);
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.get(name)
    }

    pub fn first(&self) -> Option<&RouteDescriptor> {
        self.routes.first().map(|(_, route)| route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDescriptor)> {
        self.routes.iter().map(|(name, route)| (name.as_str(), route))
    }

    pub fn into_routes(self) -> Vec<RouteDescriptor> {
        self.routes.into_values().collect()
    }
}

impl Serialize for RouteCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.routes.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::field::FieldValue;
    use std::sync::Arc;
    use uuid::Uuid;

    #[derive(Debug)]
    struct Product {
        id: Uuid,
        slug: String,
    }

    impl Entity for Product {
        fn entity_class(&self) -> &str {
            "product"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            (field == "slug").then(|| FieldValue::from(self.slug.as_str()))
        }
    }

    fn descriptor(prefix: &str, value: &str, format: Option<&str>) -> RouteDescriptor {
        let entity: EntityRef = Arc::new(Product {
            id: Uuid::nil(),
            slug: value.to_string(),
        });
        RouteDescriptor {
            static_prefix: prefix.to_string(),
            variable_pattern: format!("/{}", value),
            defaults: RouteDefaults {
                entity,
                field: "slug".to_string(),
                value: value.to_string(),
                locale: "en".to_string(),
                format: format.map(str::to_string),
            },
            add_format_pattern: format.is_some(),
            add_locale_pattern: true,
        }
    }

    #[test]
    fn test_parameters_without_format() {
        let params = descriptor("/products", "red-shirt", None).defaults.parameters();
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![ENTITY_PARAM, "slug", LOCALE_PARAM]);
        assert_eq!(params["slug"], "red-shirt");
        assert_eq!(params[LOCALE_PARAM], "en");
    }

    #[test]
    fn test_parameters_with_format() {
        let params = descriptor("/products", "red-shirt", Some("json"))
            .defaults
            .parameters();
        assert_eq!(params[FORMAT_PARAM], "json");
    }

    #[test]
    fn test_path_pattern_and_generation() {
        let route = descriptor("/products", "red-shirt", Some("json"));
        assert_eq!(route.path_pattern(), "/{_locale}/products/red-shirt.{_format}");
        assert_eq!(route.generate_path(), "/en/products/red-shirt.json");

        let route = descriptor("/products", "red-shirt", None);
        assert_eq!(route.generate_path(), "/en/products/red-shirt");
    }

    #[test]
    fn test_generation_with_root_prefix() {
        let route = descriptor("/", "about", None);
        assert_eq!(route.generate_path(), "/en/about");
    }

    #[test]
    fn test_generation_does_not_repeat_format() {
        let route = descriptor("/products", "feed.json", Some("json"));
        assert_eq!(route.generate_path(), "/en/products/feed.json");
    }

    #[test]
    fn test_collection_replaces_in_place() {
        let mut collection = RouteCollection::new();
        collection.add("a", descriptor("/p", "a", None));
        collection.add("b", descriptor("/p", "b", None));
        collection.add("a", descriptor("/t", "a", None));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(collection.get("a").unwrap().static_prefix, "/t");
        assert_eq!(collection.first().unwrap().value(), "a");
    }

    #[test]
    fn test_route_name_display() {
        assert_eq!(RouteName::from("mugs").to_string(), "mugs");
        let route = descriptor("/p", "mug", None);
        let name = RouteName::from(route.entity().clone());
        assert_eq!(name.to_string(), format!("product#{}", Uuid::nil()));
    }

    #[test]
    fn test_descriptor_serialization() {
        let json = serde_json::to_value(descriptor("/products", "red-shirt", None)).unwrap();
        assert_eq!(json["path"], "/en/products/red-shirt");
        assert_eq!(json["defaults"]["slug"], "red-shirt");
        assert_eq!(json["defaults"][ENTITY_PARAM]["class"], "product");
        assert!(json["defaults"].get(FORMAT_PARAM).is_none());
    }
}
