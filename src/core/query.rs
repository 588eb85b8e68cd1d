//! Lookup criteria and ordering for repository queries

use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Exact-match criteria for `EntityRepository::find_by`
///
/// An empty criteria set matches every entity.
///
/// # Example
/// ```rust,ignore
/// let criteria = FindCriteria::all().with("enabled", true);
/// let products = repository.find_by(&criteria, None, Some(10)).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindCriteria {
    fields: IndexMap<String, FieldValue>,
}

impl FindCriteria {
    /// Criteria matching every entity
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an exact-match condition
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check whether an entity satisfies every condition
    pub fn matches(&self, entity: &dyn Entity) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| entity.field_value(field).as_ref() == Some(expected))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering for `EntityRepository::find_by`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some(_) => return None,
            None => (expr, SortDirection::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }

    /// Compare two entities on the sort field
    ///
    /// Missing values sort first in ascending order.
    pub fn compare(&self, a: &dyn Entity, b: &dyn Entity) -> Ordering {
        let left = a.field_value(&self.field).unwrap_or(FieldValue::Null);
        let right = b.field_value(&self.field).unwrap_or(FieldValue::Null);
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
