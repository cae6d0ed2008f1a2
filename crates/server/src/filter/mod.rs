//! Player filtering, ordering, and paging.
//!
//! [`PlayerFilter`] expands into AND-combined [`Predicate`]s that are either
//! evaluated in process ([`Predicate::matches`]) or rendered as SQL by
//! [`PlayerQueryBuilder`].

mod query_builder;
mod types;

pub use query_builder::{PLAYER_COLUMNS, PLAYER_TABLE, PlayerQueryBuilder};
pub use types::{
    Bounds, DEFAULT_PAGE_SIZE, PageRequest, PlayerFilter, PlayerOrder, Predicate,
};
