//! Player query builder using SeaQuery.
//!
//! Renders a [`PlayerFilter`] as PostgreSQL SELECT statements:
//! - paged listing with ORDER BY / LIMIT / OFFSET
//! - unbounded listing
//! - COUNT(*)

use sea_query::{
    Alias, Asterisk, Cond, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};

use super::types::{Bounds, PageRequest, PlayerFilter, PlayerOrder, Predicate};

/// Table holding player rows.
pub const PLAYER_TABLE: &str = "player";

/// Columns selected for a full player row, in row order.
pub const PLAYER_COLUMNS: [&str; 10] = [
    "id",
    "name",
    "title",
    "race",
    "profession",
    "birthday",
    "banned",
    "experience",
    "level",
    "until_next_level",
];

/// Query builder for filtered player reads.
pub struct PlayerQueryBuilder {
    predicates: Vec<Predicate>,
}

impl PlayerQueryBuilder {
    pub fn new(filter: &PlayerFilter) -> Self {
        Self {
            predicates: filter.predicates(),
        }
    }

    /// Build a SELECT returning one page in the requested order.
    pub fn build_page(&self, page: &PageRequest) -> String {
        let mut query = self.select_rows();
        self.add_order(&mut query, page.order);
        query.limit(page.limit());
        query.offset(page.offset());
        query.to_string(PostgresQueryBuilder)
    }

    /// Build a SELECT returning every matching row, ordered by id.
    pub fn build_all(&self) -> String {
        let mut query = self.select_rows();
        self.add_order(&mut query, PlayerOrder::Id);
        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT query for the total number of matches.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();
        query.expr(Expr::col(Asterisk).count());
        query.from(Alias::new(PLAYER_TABLE));
        self.add_filters(&mut query);
        query.to_string(PostgresQueryBuilder)
    }

    fn select_rows(&self) -> SelectStatement {
        let mut query = Query::select();
        for column in PLAYER_COLUMNS {
            query.column((Alias::new(PLAYER_TABLE), Alias::new(column)));
        }
        query.from(Alias::new(PLAYER_TABLE));
        self.add_filters(&mut query);
        query
    }

    /// Add the conjunction of all predicates. No predicates, no WHERE.
    fn add_filters(&self, query: &mut SelectStatement) {
        if self.predicates.is_empty() {
            return;
        }
        let mut cond = Cond::all();
        for predicate in &self.predicates {
            if let Some(expr) = predicate_condition(predicate) {
                cond = cond.add(expr);
            }
        }
        query.cond_where(cond);
    }

    /// Ascending order on the requested column; id breaks ties.
    fn add_order(&self, query: &mut SelectStatement, order: PlayerOrder) {
        query.order_by(
            (Alias::new(PLAYER_TABLE), Alias::new(order.column())),
            Order::Asc,
        );
        if order != PlayerOrder::Id {
            query.order_by((Alias::new(PLAYER_TABLE), Alias::new("id")), Order::Asc);
        }
    }
}

/// Translate one predicate into a SQL condition.
fn predicate_condition(predicate: &Predicate) -> Option<SimpleExpr> {
    match predicate {
        Predicate::NameContains(value) => Some(
            column("name").like(format!("%{}%", escape_like_wildcards(value))),
        ),
        Predicate::TitleContains(value) => Some(
            column("title").like(format!("%{}%", escape_like_wildcards(value))),
        ),
        Predicate::RaceIs(race) => Some(column("race").eq(race.as_str())),
        Predicate::ProfessionIs(profession) => {
            Some(column("profession").eq(profession.as_str()))
        }
        Predicate::BirthdayIn(bounds) => range_condition("birthday", (bounds.min, bounds.max)),
        Predicate::BannedIs(banned) => Some(column("banned").eq(*banned)),
        Predicate::ExperienceIn(bounds) => range_condition("experience", widen(bounds)),
        Predicate::LevelIn(bounds) => range_condition("level", widen(bounds)),
    }
}

/// Inclusive range: BETWEEN when both ends are set, a single comparison
/// otherwise, nothing when unbounded.
fn range_condition(name: &str, bounds: (Option<i64>, Option<i64>)) -> Option<SimpleExpr> {
    match bounds {
        (Some(min), Some(max)) => Some(column(name).between(min, max)),
        (Some(min), None) => Some(column(name).gte(min)),
        (None, Some(max)) => Some(column(name).lte(max)),
        (None, None) => None,
    }
}

fn widen(bounds: &Bounds<i32>) -> (Option<i64>, Option<i64>) {
    (bounds.min.map(i64::from), bounds.max.map(i64::from))
}

fn column(name: &str) -> SimpleExpr {
    Expr::col((Alias::new(PLAYER_TABLE), Alias::new(name))).into()
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
