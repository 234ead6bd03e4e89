//! DTO modules that bridge list controllers with presentational components.

pub mod list;
