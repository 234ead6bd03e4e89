use serde::{Deserialize, Serialize};

/// Widest page count rendered without ellipsis markers.
pub const PAGE_WINDOW_LIMIT: usize = 7;

/// One slot of the pagination strip. Serializes as the page number, or as
/// `null` for an ellipsis.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page markers for a bounded-width pagination control.
///
/// Returns an empty sequence for `total_pages == 0`; a `current_page` of `0`
/// is treated as the first page.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages == 0 {
        return vec![];
    }

    if total_pages <= PAGE_WINDOW_LIMIT {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let current_page = current_page.max(1);
    let mut pages = vec![PageMarker::Page(1)];

    if current_page > 3 {
        pages.push(PageMarker::Ellipsis);
    }

    let mid_start = current_page.saturating_sub(1).max(2);
    let mid_end = (current_page + 1).min(total_pages - 1);
    pages.extend((mid_start..=mid_end).map(PageMarker::Page));

    if current_page < total_pages - 2 {
        pages.push(PageMarker::Ellipsis);
    }
    pages.push(PageMarker::Page(total_pages));

    pages
}

/// Totals reported by the backend next to a page of rows.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_page: usize,
    pub total_record: usize,
}

impl PageInfo {
    pub fn from_totals(total_record: usize, per_page: usize) -> Self {
        Self {
            total_page: total_record.div_ceil(per_page.max(1)),
            total_record,
        }
    }

    /// Highest page the pagination control may navigate to.
    pub fn last_page(&self) -> usize {
        self.total_page.max(1)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageMarker>,
    pub page: usize,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pages: Vec::new(),
            page: 1,
        }
    }
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = page_window(current_page, total_pages);

        Self {
            items,
            pages,
            page: current_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PageMarker::{Ellipsis, Page};

    #[test]
    fn zero_pages_renders_nothing() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn current_page_zero_is_first_page() {
        assert_eq!(page_window(0, 10), page_window(1, 10));
    }

    #[test]
    fn out_of_range_current_page_stays_bounded() {
        assert_eq!(page_window(12, 10), vec![Page(1), Ellipsis, Page(10)]);
    }

    #[test]
    fn near_end_has_no_trailing_ellipsis() {
        assert_eq!(
            page_window(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn markers_serialize_like_optional_numbers() {
        let json = serde_json::to_string(&page_window(5, 10)).unwrap();
        assert_eq!(json, "[1,null,4,5,6,null,10]");
    }

    #[test]
    fn page_info_rounds_up() {
        assert_eq!(PageInfo::from_totals(21, 10).total_page, 3);
        assert_eq!(PageInfo::from_totals(0, 10).total_page, 0);
        assert_eq!(PageInfo::from_totals(0, 10).last_page(), 1);
    }

    #[test]
    fn paginated_normalizes_page_zero() {
        let paginated = Paginated::new(vec!["a"], 0, 3);
        assert_eq!(paginated.page, 1);
        assert_eq!(paginated.pages, vec![Page(1), Page(2), Page(3)]);
    }
}
