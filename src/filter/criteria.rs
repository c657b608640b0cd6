use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User-controlled predicate configuration narrowing the visible records.
///
/// The default value is all-permissive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_term: String,
    pub countries: BTreeSet<String>,
    pub expertise_areas: BTreeSet<String>,
    pub min_publications: Option<u64>,
    pub max_publications: Option<u64>,
}

impl FilterCriteria {
    /// True when no criterion restricts the record set
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.countries.is_empty()
            && self.expertise_areas.is_empty()
            && self.min_publications.is_none()
            && self.max_publications.is_none()
    }

    /// Merge a partial update; fields the update leaves unset keep their value
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(search_term) = update.search_term {
            self.search_term = search_term;
        }
        if let Some(countries) = update.countries {
            self.countries = countries;
        }
        if let Some(expertise_areas) = update.expertise_areas {
            self.expertise_areas = expertise_areas;
        }
        if let Some(min) = update.min_publications {
            self.min_publications = min;
        }
        if let Some(max) = update.max_publications {
            self.max_publications = max;
        }
    }
}

/// Partial update of [`FilterCriteria`].
///
/// `None` leaves a field unchanged. The publication bounds are doubly
/// optional: `Some(None)` removes the bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search_term: Option<String>,
    pub countries: Option<BTreeSet<String>>,
    pub expertise_areas: Option<BTreeSet<String>>,
    pub min_publications: Option<Option<u64>>,
    pub max_publications: Option<Option<u64>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn expertise_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise_areas = Some(areas.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_publications(mut self, min: Option<u64>) -> Self {
        self.min_publications = Some(min);
        self
    }

    pub fn max_publications(mut self, max: Option<u64>) -> Self {
        self.max_publications = Some(max);
        self
    }

    /// True when applying this update would change nothing
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}
