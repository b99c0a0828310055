use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::employee::Employee;
use crate::models::recommendation::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Department,
    Status,
    Priority,
    #[serde(rename = "type")]
    Kind,
}

/// Field → accepted value. Absent or blank keys do not constrain; every
/// present key must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    #[serde(default)]
    fields: BTreeMap<FilterField, String>,
    #[serde(default)]
    search: Option<String>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.set_search(Some(query.into()));
        self
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        match value.filter(|value| !value.trim().is_empty()) {
            Some(value) => {
                self.fields.insert(field, value);
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    pub fn set_search(&mut self, query: Option<String>) {
        self.search = query
            .map(|query| query.trim().to_lowercase())
            .filter(|query| !query.is_empty());
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.search.is_none()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        let fields_match = self
            .fields
            .iter()
            .all(|(field, accepted)| item.field_value(*field) == Some(accepted.as_str()));

        let search_matches = match self.search.as_deref() {
            None => true,
            Some(query) => item
                .searchable_text()
                .into_iter()
                .any(|text| text.to_lowercase().contains(query)),
        };

        fields_match && search_matches
    }
}

/// Exposes the fields a `PredicateSet` can test.
pub trait Filterable {
    fn field_value(&self, field: FilterField) -> Option<&str>;

    fn searchable_text(&self) -> Vec<&str>;
}

impl Filterable for Employee {
    fn field_value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Department => self.department.as_deref(),
            FilterField::Status => Some(self.status.as_str()),
            FilterField::Priority | FilterField::Kind => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.position.as_deref(),
            self.department.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Filterable for Recommendation {
    fn field_value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Department => self.department.as_deref(),
            FilterField::Priority => Some(self.priority.as_str()),
            FilterField::Kind => self.kind.as_deref(),
            FilterField::Status => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.department.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Returns the matching items in source order; the source is left untouched.
pub fn apply<T>(collection: &[T], predicates: &PredicateSet) -> Vec<T>
where
    T: Filterable + Clone,
{
    if predicates.is_empty() {
        return collection.to_vec();
    }

    collection
        .iter()
        .filter(|item| predicates.matches(*item))
        .cloned()
        .collect()
}
