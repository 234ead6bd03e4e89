//! Controller layer: list events, reducer-like query transitions and the
//! async session that drives them.

pub mod events;
#[cfg(feature = "runtime")]
pub mod session;
pub mod state;

pub use events::{FetchRequest, FetchTicket, ListEvent, SettledSearch};
pub use state::ListController;
