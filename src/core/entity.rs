//! Entity trait for objects that can be reached through a slug route

use crate::core::field::FieldValue;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Base trait for all routable entities.
///
/// Every entity exposes:
/// - class: the entity class identifier used as key in the route configuration
///   (e.g., "product", "taxon")
/// - id: Unique identifier
/// - field_value: Dynamic field access, used to read the configured route field
///
/// The trait is object safe: repositories hand entities out as [`EntityRef`]
/// so one resolver can serve many entity classes.
pub trait Entity: fmt::Debug + Send + Sync + 'static {
    /// The entity class identifier (e.g., "product")
    fn entity_class(&self) -> &str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Read a field rendered as a path value
    fn route_value(&self, field: &str) -> Option<String> {
        self.field_value(field)
            .and_then(|value| value.to_route_value())
    }
}

/// Shared handle to an entity of any class
pub type EntityRef = Arc<dyn Entity>;
