//! Lossless mapping between [`ListQuery`] and flat key-value pairs.
use url::form_urlencoded;

use crate::domain::filter::FilterSet;
use crate::domain::query::ListQuery;
use crate::domain::resource::ListScreen;
use crate::domain::types::{PageNumber, PageSize, SearchText};
use crate::location::FlatKv;
use crate::models::config::ListConfig;

/// Encodes and decodes the query of one list screen.
#[derive(Clone, Copy, Debug)]
pub struct QueryCodec {
    screen: ListScreen,
    default_take: PageSize,
    max_take: usize,
}

impl QueryCodec {
    pub fn new(screen: ListScreen, default_take: PageSize, max_take: usize) -> Self {
        Self {
            screen,
            default_take,
            max_take,
        }
    }

    pub fn from_config(screen: ListScreen, config: &ListConfig) -> Self {
        Self::new(screen, config.default_page_size(), config.max_take)
    }

    pub fn screen(&self) -> &ListScreen {
        &self.screen
    }

    /// Query used when the location carries nothing usable.
    pub fn default_query(&self) -> ListQuery {
        ListQuery::new(self.default_take)
    }

    /// Emits `page`, `take`, `search` when present, then each filter
    /// dimension in key order as repeated keys. Dimensions not on the screen
    /// are left out, so only queries built from the screen's own dimensions
    /// round-trip.
    pub fn encode(&self, query: &ListQuery) -> FlatKv {
        let mut pairs = vec![
            ("page".to_string(), query.page.to_string()),
            ("take".to_string(), query.take.to_string()),
        ];
        if let Some(search) = &query.search {
            pairs.push(("search".to_string(), search.to_string()));
        }
        for (key, values) in query.filters.iter() {
            let Some(dimension) = self.screen.dimension(key) else {
                log::debug!(
                    "Not encoding filter `{key}` unknown to the {} list",
                    self.screen.resource.slug()
                );
                continue;
            };
            pairs.extend(
                values
                    .iter()
                    .map(|value| (key.to_string(), dimension.codec.encode(value))),
            );
        }
        pairs
    }

    /// Parses pairs into a query. Malformed or out-of-bound values fall back
    /// to defaults; for scalar keys the last occurrence wins.
    pub fn decode(&self, pairs: &FlatKv) -> ListQuery {
        let mut query = self.default_query();
        let mut filters = FilterSet::new();
        let mut selections = Vec::with_capacity(self.screen.filters.len());
        selections.resize_with(self.screen.filters.len(), Vec::new);

        for (key, raw) in pairs {
            match key.as_str() {
                "page" => match raw.parse::<usize>().map(PageNumber::new) {
                    Ok(Ok(page)) => query.page = page,
                    _ => {
                        log::debug!("Ignoring invalid page `{raw}`");
                        query.page = PageNumber::FIRST;
                    }
                },
                "take" => match raw
                    .parse::<usize>()
                    .map(|take| PageSize::bounded(take, self.max_take))
                {
                    Ok(Ok(take)) => query.take = take,
                    _ => {
                        log::debug!("Ignoring invalid take `{raw}`");
                        query.take = self.default_take;
                    }
                },
                "search" => query.search = SearchText::parse(raw),
                _ => {
                    let position = self.screen.filters.iter().position(|d| d.key == key.as_str());
                    let Some(index) = position else {
                        log::debug!("Ignoring unknown query key `{key}`");
                        continue;
                    };
                    match self.screen.filters[index].codec.decode(raw) {
                        Ok(value) => selections[index].push(value),
                        Err(err) => log::debug!("Ignoring filter `{key}={raw}`: {err}"),
                    }
                }
            }
        }

        for (dimension, values) in self.screen.filters.iter().zip(selections) {
            filters = filters.with_selection(dimension, values);
        }
        query.filters = filters;
        query
    }
}

/// Serializes pairs as an `application/x-www-form-urlencoded` string.
pub fn to_query_string(pairs: &FlatKv) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}

/// Parses an `application/x-www-form-urlencoded` string, tolerating a
/// leading `?`.
pub fn parse_query_string(raw: &str) -> FlatKv {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterValue;
    use crate::domain::resource::ResourceKind;

    fn codec() -> QueryCodec {
        QueryCodec::new(ResourceKind::Character.screen(), PageSize::default(), 200)
    }

    fn pairs(raw: &[(&str, &str)]) -> FlatKv {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn empty_location_decodes_to_defaults() {
        let query = codec().decode(&Vec::new());
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn invalid_scalars_fall_back_to_defaults() {
        let query = codec().decode(&pairs(&[("page", "abc"), ("take", "9000"), ("search", "  ")]));
        assert_eq!(query.page.get(), 1);
        assert_eq!(query.take.get(), 10);
        assert!(query.search.is_none());

        let query = codec().decode(&pairs(&[("page", "0"), ("take", "0")]));
        assert_eq!(query.page.get(), 1);
        assert_eq!(query.take.get(), 10);
    }

    #[test]
    fn last_scalar_occurrence_wins() {
        let query = codec().decode(&pairs(&[("page", "2"), ("page", "4")]));
        assert_eq!(query.page.get(), 4);
    }

    #[test]
    fn configured_max_take_is_enforced() {
        let codec = QueryCodec::new(ResourceKind::Weapon.screen(), PageSize::default(), 50);
        assert_eq!(codec.decode(&pairs(&[("take", "50")])).take.get(), 50);
        assert_eq!(codec.decode(&pairs(&[("take", "51")])).take.get(), 10);
    }

    #[test]
    fn invalid_filter_values_are_dropped() {
        let query = codec().decode(&pairs(&[
            ("element", "pyro"),
            ("element", "plasma"),
            ("rarity", "five"),
            ("rarity", "4"),
            ("is_active", "yes"),
            ("unknown", "1"),
        ]));
        assert_eq!(query.filters.selection("element"), &[FilterValue::text("pyro")]);
        assert_eq!(query.filters.selection("rarity"), &[FilterValue::Integer(4)]);
        assert!(query.filters.selection("is_active").is_empty());
        assert!(query.filters.selection("unknown").is_empty());
    }

    #[test]
    fn encode_writes_repeated_filter_keys() {
        let screen = ResourceKind::Character.screen();
        let element = screen.dimension("element").unwrap();
        let query = ListQuery::default()
            .search("a&b")
            .filter(element, [FilterValue::text("pyro"), FilterValue::text("cryo")]);

        assert_eq!(
            codec().encode(&query),
            pairs(&[
                ("page", "1"),
                ("take", "10"),
                ("search", "a&b"),
                ("element", "pyro"),
                ("element", "cryo"),
            ])
        );
    }

    #[test]
    fn encode_leaves_out_foreign_dimensions() {
        let role = ResourceKind::User.screen().dimension("role").unwrap();
        let query = ListQuery::default().filter(role, [FilterValue::text("admin")]);

        let encoded = codec().encode(&query);
        assert_eq!(encoded, pairs(&[("page", "1"), ("take", "10")]));
        assert!(codec().decode(&encoded).filters.is_empty());
    }

    #[test]
    fn query_string_escapes_reserved_characters() {
        let encoded = to_query_string(&pairs(&[("search", "a & b=c"), ("page", "2")]));
        assert_eq!(encoded, "search=a+%26+b%3Dc&page=2");
        assert_eq!(
            parse_query_string(&format!("?{encoded}")),
            pairs(&[("search", "a & b=c"), ("page", "2")])
        );
    }
}
