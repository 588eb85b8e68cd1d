//! Macros for reducing boilerplate when defining routable entities

/// Macro to create a routable entity with its `Entity` implementation
///
/// Generates:
/// - the struct with an `id: Uuid` and the listed fields
/// - `new(..)` taking the listed fields in order and generating an id
/// - `CLASS`, the entity class identifier
/// - `Entity::field_value` for `id` and every listed field
///
/// Every field type must convert into `FieldValue` (strings, integers,
/// floats, booleans, uuids and `Option`s of those).
///
/// # Example
///
/// ```rust,ignore
/// use storefront::prelude::*;
///
/// impl_route_entity!(
///     Product,
///     "product",
///     {
///         name: String,
///         slug: String,
///         enabled: bool,
///     }
/// );
///
/// let product = Product::new("Red shirt".to_string(), "red-shirt".to_string(), true);
/// assert_eq!(product.route_value("slug").as_deref(), Some("red-shirt"));
/// ```
#[macro_export]
macro_rules! impl_route_entity {
    (
        $type:ident,
        $class:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            $( pub $field: $field_type, )*
        }

        impl $type {
            /// Entity class identifier used in the routing configuration
            pub const CLASS: &'static str = $class;

            /// Create a new instance of this entity
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    $( $field, )*
                }
            }
        }

        impl $crate::core::entity::Entity for $type {
            fn entity_class(&self) -> &str {
                $class
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::Uuid(self.id)),
                    $(
                        stringify!($field) => Some($crate::core::field::FieldValue::from(
                            self.$field.clone(),
                        )),
                    )*
                    _ => None,
                }
            }
        }
    };
}
