//! Query model shared by every list screen of the dashboard.

pub mod filter;
pub mod query;
pub mod resource;
pub mod types;
