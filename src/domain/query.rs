//! The canonical list query and its named transitions.
//!
//! A [`ListQuery`] is never mutated in place by the controller: each user
//! action produces a new value through one of the `with_*` transitions.
use serde::Serialize;

use crate::domain::filter::{FilterDimension, FilterSet, FilterValue};
use crate::domain::types::{PageNumber, PageSize, SearchText};

/// What a list screen is currently asking the backend for.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageNumber,
    pub take: PageSize,
    pub search: Option<SearchText>,
    pub filters: FilterSet,
}

impl ListQuery {
    pub fn new(take: PageSize) -> Self {
        Self {
            take,
            ..Self::default()
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = SearchText::parse(&search.into());
        self
    }

    pub fn paginate(mut self, page: PageNumber) -> Self {
        self.page = page;
        self
    }

    /// Sets one dimension's selection. The location encoder only writes
    /// dimensions of its own screen.
    pub fn filter(
        mut self,
        dimension: &FilterDimension,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        self.filters = self.filters.with_selection(dimension, values);
        self
    }

    /// Search edit: replaces the trimmed search text and resets to page 1.
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            page: PageNumber::FIRST,
            search: SearchText::parse(text),
            ..self.clone()
        }
    }

    /// Filter edit: replaces one dimension's selection and resets to page 1.
    pub fn with_filter(
        &self,
        dimension: &FilterDimension,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            page: PageNumber::FIRST,
            filters: self.filters.with_selection(dimension, values),
            ..self.clone()
        }
    }

    /// Page change: replaces only the page.
    pub fn with_page(&self, page: PageNumber) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Whether both queries select the same rows regardless of paging.
    pub fn same_criteria(&self, other: &ListQuery) -> bool {
        self.search == other.search && self.filters == other.filters
    }

    pub fn search_text(&self) -> &str {
        self.search.as_ref().map(SearchText::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterCodec;

    const RARITY: FilterDimension = FilterDimension::multi("rarity", FilterCodec::Integer);

    fn on_page(page: usize) -> ListQuery {
        ListQuery::default().paginate(PageNumber::new(page).unwrap())
    }

    #[test]
    fn default_query_is_first_page_of_ten() {
        let query = ListQuery::default();
        assert_eq!(query.page.get(), 1);
        assert_eq!(query.take.get(), 10);
        assert!(query.search.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn search_edit_resets_page() {
        let next = on_page(5).with_search("  Diluc ");
        assert_eq!(next.page, PageNumber::FIRST);
        assert_eq!(next.search_text(), "Diluc");
    }

    #[test]
    fn blank_search_clears_text() {
        let next = on_page(2).search("amber").with_search("   ");
        assert!(next.search.is_none());
    }

    #[test]
    fn filter_edit_resets_page() {
        let next = on_page(5).with_filter(&RARITY, [FilterValue::Integer(5)]);
        assert_eq!(next.page, PageNumber::FIRST);
        assert_eq!(next.filters.selection("rarity"), &[FilterValue::Integer(5)]);
    }

    #[test]
    fn page_change_keeps_criteria() {
        let base = ListQuery::default()
            .search("bow")
            .filter(&RARITY, [FilterValue::Integer(4)]);
        let next = base.with_page(PageNumber::new(3).unwrap());
        assert_eq!(next.page.get(), 3);
        assert!(next.same_criteria(&base));
        assert_ne!(next, base);
    }
}
