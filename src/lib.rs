//! List screen state for the companion-site admin dashboard.
//!
//! Every list screen (characters, weapons, staff, staff roles, users, cost
//! milestones) keeps a [`ListQuery`](domain::query::ListQuery) in lockstep
//! with the location's query string, debounces search input, and issues one
//! fetch per committed change through a [`PageFetcher`](fetch::PageFetcher).

pub mod controller;
pub mod debounce;
pub mod domain;
pub mod dto;
pub mod fetch;
pub mod location;
pub mod models;
pub mod pagination;

pub use controller::ListController;
#[cfg(feature = "runtime")]
pub use controller::session::{ListHandle, ListSession};
