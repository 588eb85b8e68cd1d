//! Core module containing fundamental traits and types for slug routing

pub mod entity;
pub mod error;
pub mod field;
pub mod locale;
pub mod query;
pub mod repository;

pub use entity::{Entity, EntityRef};
pub use error::{RoutingError, RoutingResult};
pub use field::FieldValue;
pub use locale::{FixedLocaleContext, LocaleContext, LocaleProvider, StaticLocaleProvider};
pub use query::{FindCriteria, SortDirection, SortOrder};
pub use repository::EntityRepository;
