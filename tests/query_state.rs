use companion_admin::domain::filter::{FilterCodec, FilterValue};
use companion_admin::domain::query::ListQuery;
use companion_admin::domain::resource::ResourceKind;
use companion_admin::domain::types::{PageNumber, PageSize};
use companion_admin::location::{
    HistoryMode, LocationReader, MemoryLocation, QueryCodec, QueryState, parse_query_string,
    to_query_string,
};
use companion_admin::models::config::ListConfig;

fn state_for(kind: ResourceKind, location: MemoryLocation) -> QueryState<MemoryLocation> {
    QueryState::new(
        location,
        QueryCodec::from_config(kind.screen(), &ListConfig::default()),
    )
}

/// A query exercising every filter dimension of the screen.
fn populated_query(kind: ResourceKind) -> ListQuery {
    let mut query = ListQuery::new(PageSize::new(50).unwrap())
        .paginate(PageNumber::new(7).unwrap())
        .search("a&b = c d");
    for dimension in kind.screen().filters {
        let values = match dimension.codec {
            FilterCodec::Text => vec![FilterValue::text("x & y"), FilterValue::text("z=1")],
            FilterCodec::Integer => vec![FilterValue::Integer(5), FilterValue::Integer(-3)],
            FilterCodec::Boolean => vec![FilterValue::Boolean(false)],
            FilterCodec::OneOf(options) => options
                .iter()
                .rev()
                .take(2)
                .map(|option| FilterValue::text(*option))
                .collect(),
        };
        query = query.filter(dimension, values);
    }
    query
}

#[test]
fn initial_load_without_state_yields_defaults() {
    let state = state_for(ResourceKind::Weapon, MemoryLocation::new());
    let query = state.read();

    assert_eq!(query.page.get(), 1);
    assert_eq!(query.take.get(), 10);
    assert!(query.search.is_none());
    assert!(query.filters.is_empty());
}

#[test]
fn every_screen_round_trips_through_location() {
    for kind in ResourceKind::ALL {
        let state = state_for(kind, MemoryLocation::new());
        let query = populated_query(kind);

        state.write(&query, HistoryMode::Replace);

        assert_eq!(state.read(), query, "{kind:?}");
    }
}

#[test]
fn round_trip_survives_query_string() {
    let kind = ResourceKind::Character;
    let query = populated_query(kind);
    let writer = state_for(kind, MemoryLocation::new());
    writer.write(&query, HistoryMode::Replace);

    let raw = to_query_string(&writer.location().current_query());
    assert!(raw.contains("search=a%26b+%3D+c+d"), "{raw}");

    let reader = state_for(kind, MemoryLocation::from_query_string(&raw));
    assert_eq!(reader.read(), query);
}

#[test]
fn multi_value_filter_order_is_preserved() {
    let kind = ResourceKind::Staff;
    let state = state_for(
        kind,
        MemoryLocation::from_query_string("role_id=3&role_id=1&role_id=3"),
    );
    let query = state.read();

    assert_eq!(
        query.filters.selection("role_id"),
        &[FilterValue::Integer(3), FilterValue::Integer(1)]
    );
}

#[test]
fn foreign_and_malformed_keys_are_tolerated() {
    let state = state_for(
        ResourceKind::CostMilestone,
        MemoryLocation::from_query_string("?page=-2&take=abc&is_active=true&utm_source=mail"),
    );
    let query = state.read();

    assert_eq!(query.page.get(), 1);
    assert_eq!(query.take.get(), 10);
    assert_eq!(query.filters.selection("is_active"), &[FilterValue::Boolean(true)]);
    assert_eq!(
        to_query_string(&state.codec().encode(&query)),
        "page=1&take=10&is_active=true"
    );
}

#[test]
fn parse_handles_plus_and_percent_escapes() {
    assert_eq!(
        parse_query_string("search=Hu+Tao%26Co"),
        vec![("search".to_string(), "Hu Tao&Co".to_string())]
    );
}
