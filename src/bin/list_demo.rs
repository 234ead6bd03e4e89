//! Line-oriented shell browsing an in-memory character roster through a real
//! list session.
//!
//! Commands: `s <text>`, `f <filter> [values..]`, `p <page>`,
//! `open <query>`, `back`, `forward`, `url`, `quit`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dotenvy::dotenv;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use companion_admin::domain::filter::FilterValue;
use companion_admin::domain::query::ListQuery;
use companion_admin::domain::resource::{ListScreen, ResourceKind};
use companion_admin::dto::list::ListView;
use companion_admin::fetch::{FetchResult, PageFetcher, PageResponse};
use companion_admin::location::{
    LocationReader, MemoryLocation, QueryCodec, QueryState, parse_query_string, to_query_string,
};
use companion_admin::models::config::ListConfig;
use companion_admin::pagination::{PageInfo, PageMarker};
use companion_admin::{ListHandle, ListSession};

const FETCH_LATENCY: Duration = Duration::from_millis(150);

#[derive(Clone, Debug, Serialize)]
struct Character {
    name: &'static str,
    element: &'static str,
    rarity: i64,
    weapon_type: &'static str,
    is_active: bool,
}

const fn character(
    name: &'static str,
    element: &'static str,
    rarity: i64,
    weapon_type: &'static str,
) -> Character {
    Character {
        name,
        element,
        rarity,
        weapon_type,
        is_active: true,
    }
}

const ROSTER: &[Character] = &[
    character("Amber", "pyro", 4, "bow"),
    character("Kaeya", "cryo", 4, "sword"),
    character("Lisa", "electro", 4, "catalyst"),
    character("Diluc", "pyro", 5, "claymore"),
    character("Jean", "anemo", 5, "sword"),
    character("Xiangling", "pyro", 4, "polearm"),
    character("Zhongli", "geo", 5, "polearm"),
    character("Ganyu", "cryo", 5, "bow"),
    character("Xingqiu", "hydro", 4, "sword"),
    character("Nahida", "dendro", 5, "catalyst"),
    character("Fischl", "electro", 4, "bow"),
    character("Noelle", "geo", 4, "claymore"),
    Character {
        is_active: false,
        ..character("Aloy", "cryo", 5, "bow")
    },
];

impl Character {
    fn matches(&self, query: &ListQuery) -> bool {
        let selected = |key: &str, value: FilterValue| {
            let selection = query.filters.selection(key);
            selection.is_empty() || selection.contains(&value)
        };
        let search = query.search_text().to_lowercase();
        self.name.to_lowercase().contains(&search)
            && selected("element", FilterValue::text(self.element))
            && selected("rarity", FilterValue::Integer(self.rarity))
            && selected("weapon_type", FilterValue::text(self.weapon_type))
            && selected("is_active", FilterValue::Boolean(self.is_active))
    }
}

struct RosterFetcher;

#[async_trait]
impl PageFetcher for RosterFetcher {
    type Item = Character;

    async fn fetch_page(&self, query: &ListQuery) -> FetchResult<Character> {
        tokio::time::sleep(FETCH_LATENCY).await;

        let matching: Vec<Character> = ROSTER
            .iter()
            .filter(|character| character.matches(query))
            .cloned()
            .collect();
        let take = query.take.get();
        let items = matching
            .iter()
            .skip((query.page.get() - 1) * take)
            .take(take)
            .cloned()
            .collect();

        Ok(PageResponse::new(
            items,
            Some(PageInfo::from_totals(matching.len(), take)),
        ))
    }
}

fn render(view: &ListView<Character>) {
    let pages: Vec<String> = view
        .rows
        .pages
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == view.rows.page => format!("[{page}]"),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect();
    let names: Vec<&str> = view.rows.items.iter().map(|c| c.name).collect();

    println!(
        "search box: {:?} | status: {:?} | {}",
        view.search_input,
        view.status,
        view.error.as_deref().unwrap_or("ok")
    );
    println!("  rows: {}", names.join(", "));
    println!("  pages: {}", pages.join(" "));
}

fn parse_values(screen: &ListScreen, dimension: &str, raw: &[&str]) -> Option<Vec<FilterValue>> {
    let Some(dimension) = screen.dimension(dimension) else {
        println!("unknown filter `{dimension}`");
        return None;
    };
    let mut values = Vec::with_capacity(raw.len());
    for value in raw {
        match dimension.codec.decode(value) {
            Ok(value) => values.push(value),
            Err(err) => println!("skipping `{value}`: {err}"),
        }
    }
    Some(values)
}

/// Applies one shell command. Returns `false` once the shell should exit.
fn dispatch(
    line: &str,
    handle: &ListHandle<Character>,
    location: &MemoryLocation,
    screen: &ListScreen,
) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "s" | "search" => {
            handle.search(rest);
        }
        "f" | "filter" => {
            let mut parts = rest.split_whitespace();
            let Some(dimension) = parts.next() else {
                println!("usage: f <filter> [values..]");
                return true;
            };
            let raw: Vec<&str> = parts.collect();
            if let Some(values) = parse_values(screen, dimension, &raw) {
                handle.set_filter(dimension, values);
            }
        }
        "p" | "page" => match rest.trim().parse::<usize>() {
            Ok(page) => {
                handle.goto_page(page);
            }
            Err(_) => println!("usage: p <page>"),
        },
        "open" => {
            location.navigate(parse_query_string(rest.trim()));
            handle.location_changed();
        }
        "back" => {
            if location.back() {
                handle.location_changed();
            }
        }
        "forward" => {
            if location.forward() {
                handle.location_changed();
            }
        }
        "url" => println!("?{}", to_query_string(&location.current_query())),
        "q" | "quit" => {
            handle.close();
            return false;
        }
        "" => {}
        other => println!("unknown command `{other}`"),
    }
    true
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ListConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading list config: {err}");
            std::process::exit(1);
        }
    };

    let screen = ResourceKind::Character.screen();
    let initial = env::args().nth(1).unwrap_or_default();
    let location = MemoryLocation::from_query_string(&initial);
    let state = QueryState::new(location.clone(), QueryCodec::from_config(screen, &config));

    let (session, handle) = ListSession::start(Arc::new(RosterFetcher), state, &config);
    let session = tokio::spawn(session.run());

    let mut view = handle.view();
    tokio::spawn(async move {
        while view.changed().await.is_ok() {
            render(&view.borrow_and_update());
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if !dispatch(line.trim(), &handle, &location, &screen) {
                    break;
                }
            }
            Ok(None) => {
                handle.close();
                break;
            }
            Err(err) => {
                log::error!("Failed to read command: {err}");
                handle.close();
                break;
            }
        }
    }

    if let Err(err) = session.await {
        log::error!("List session task failed: {err}");
    }
}
