//! Filtered views and summary counts derived from a collection.
//!
//! Everything here is pure: the same collection and [`QueryState`] always
//! produce the same [`View`], and nothing is written back to the store.

use std::str::FromStr;

use crate::domain::types::TypeConstraintError;

pub mod client;
pub mod project;

/// Entities that can be searched, filtered and summarized.
pub trait Queryable: Sized {
    /// Value selected by the status cards.
    type Filter: Copy + PartialEq + FromStr<Err = TypeConstraintError>;
    /// Counts shown on the status cards.
    type Stats: Clone + std::fmt::Debug + Default + PartialEq;

    /// Textual fields the search box matches against. Absent optional
    /// fields are omitted.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_filter(&self, filter: Self::Filter) -> bool;

    /// Counts over the whole, unfiltered collection.
    fn summarize(items: &[Self]) -> Self::Stats;

    /// Case-insensitive substring match; `needle` must already be lower-cased.
    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Search text and status filter of one view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState<F> {
    search_text: String,
    status_filter: Option<F>,
}

impl<F> Default for QueryState<F> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status_filter: None,
        }
    }
}

impl<F> QueryState<F>
where
    F: Copy + PartialEq + FromStr<Err = TypeConstraintError>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status_filter(&self) -> Option<F> {
        self.status_filter
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.status_filter = filter;
        self
    }

    /// Selecting the active filter again clears it.
    #[must_use]
    pub fn toggle_filter(self, filter: F) -> Self {
        let next = if self.status_filter == Some(filter) {
            None
        } else {
            Some(filter)
        };
        self.with_filter(next)
    }

    /// Parses a textual filter, folding case and diacritics. A blank label
    /// clears the filter.
    pub fn with_filter_label(self, label: &str) -> Result<Self, TypeConstraintError> {
        if label.trim().is_empty() {
            return Ok(self.with_filter(None));
        }
        let filter = label.parse::<F>()?;
        Ok(self.with_filter(Some(filter)))
    }

    /// Whether `item` passes both the search text and the status filter.
    pub fn matches<E>(&self, item: &E) -> bool
    where
        E: Queryable<Filter = F>,
    {
        let needle = self.search_text.to_lowercase();
        item.matches_search(&needle)
            && self
                .status_filter
                .is_none_or(|filter| item.matches_filter(filter))
    }

    /// Items passing the query, in their original order.
    pub fn apply<'a, E>(&self, items: &'a [E]) -> Vec<&'a E>
    where
        E: Queryable<Filter = F>,
    {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// What the rendering layer draws for one entity type.
#[derive(Clone, Debug, PartialEq)]
pub struct View<E: Queryable> {
    pub items: Vec<E>,
    pub stats: E::Stats,
}

/// Derives the filtered list and the unfiltered counts in one pass.
pub fn derive_view<E>(items: &[E], query: &QueryState<E::Filter>) -> View<E>
where
    E: Queryable + Clone,
{
    View {
        items: query.apply(items).into_iter().cloned().collect(),
        stats: E::summarize(items),
    }
}
