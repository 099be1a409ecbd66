use serde::{Deserialize, Serialize};

/// A predicate or window passed to [`Repository::list`](crate::Repository::list)
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<Id> {
    Collection(CollectionFilter<Id>),
    LimitOffset(LimitOffset),
    OrderBy(OrderBy),
}

/// Selects records whose `field_name` holds one of `values`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFilter<T> {
    pub field_name: String,
    pub values: Vec<T>,
}

impl<T: PartialEq> CollectionFilter<T> {
    pub fn new(field_name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            field_name: field_name.into(),
            values,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOffset {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field_name: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl<Id> Filter<Id> {
    pub fn collection(field_name: impl Into<String>, values: Vec<Id>) -> Self {
        Filter::Collection(CollectionFilter {
            field_name: field_name.into(),
            values,
        })
    }

    pub fn limit_offset(limit: usize, offset: usize) -> Self {
        Filter::LimitOffset(LimitOffset { limit, offset })
    }

    pub fn order_by(field_name: impl Into<String>, sort_order: SortOrder) -> Self {
        Filter::OrderBy(OrderBy {
            field_name: field_name.into(),
            sort_order,
        })
    }

    pub fn is_pagination(&self) -> bool {
        matches!(self, Filter::LimitOffset(_))
    }
}
