//! Filter, sort, and paging types for player queries.
//!
//! A [`PlayerFilter`] holds the optional criteria a caller supplied. It
//! expands into a list of [`Predicate`]s, one per *present* criterion, and
//! the list is combined with logical AND. An absent criterion contributes no
//! predicate, so an empty filter matches every player.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::{Player, Profession, Race};

/// Default number of players per page.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Inclusive range with independently optional ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Whether neither end is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `value` lies within the bounds (ends included).
    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// A single atomic constraint on players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive substring match on `name`.
    NameContains(String),
    /// Case-sensitive substring match on `title`.
    TitleContains(String),
    RaceIs(Race),
    ProfessionIs(Profession),
    /// `birthday` (epoch millis) within the bounds.
    BirthdayIn(Bounds<i64>),
    BannedIs(bool),
    ExperienceIn(Bounds<i32>),
    LevelIn(Bounds<i32>),
}

impl Predicate {
    /// Evaluate the predicate against a player in process.
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Predicate::NameContains(needle) => player.name.contains(needle.as_str()),
            Predicate::TitleContains(needle) => player.title.contains(needle.as_str()),
            Predicate::RaceIs(race) => player.race == *race,
            Predicate::ProfessionIs(profession) => player.profession == *profession,
            Predicate::BirthdayIn(bounds) => bounds.contains(player.birthday),
            Predicate::BannedIs(banned) => player.banned == *banned,
            Predicate::ExperienceIn(bounds) => bounds.contains(player.experience),
            Predicate::LevelIn(bounds) => bounds.contains(player.level),
        }
    }
}

/// Optional filter criteria for listing and counting players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Earliest birthday (epoch millis, inclusive).
    pub after: Option<i64>,
    /// Latest birthday (epoch millis, inclusive).
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

impl PlayerFilter {
    /// Active predicates, in a fixed order. Empty means "match everything".
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(name) = &self.name {
            predicates.push(Predicate::NameContains(name.clone()));
        }
        if let Some(title) = &self.title {
            predicates.push(Predicate::TitleContains(title.clone()));
        }
        if let Some(race) = self.race {
            predicates.push(Predicate::RaceIs(race));
        }
        if let Some(profession) = self.profession {
            predicates.push(Predicate::ProfessionIs(profession));
        }

        let birthday = Bounds::new(self.after, self.before);
        if !birthday.is_unbounded() {
            predicates.push(Predicate::BirthdayIn(birthday));
        }

        if let Some(banned) = self.banned {
            predicates.push(Predicate::BannedIs(banned));
        }

        let experience = Bounds::new(self.min_experience, self.max_experience);
        if !experience.is_unbounded() {
            predicates.push(Predicate::ExperienceIn(experience));
        }

        let level = Bounds::new(self.min_level, self.max_level);
        if !level.is_unbounded() {
            predicates.push(Predicate::LevelIn(level));
        }

        predicates
    }

    /// Whether a player satisfies every active predicate.
    pub fn matches(&self, player: &Player) -> bool {
        self.predicates().iter().all(|p| p.matches(player))
    }
}

/// Sortable player attributes. Sorting is always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerOrder {
    /// Column the order sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            PlayerOrder::Id => "id",
            PlayerOrder::Name => "name",
            PlayerOrder::Experience => "experience",
            PlayerOrder::Birthday => "birthday",
            PlayerOrder::Level => "level",
        }
    }

    /// Compare two players on this attribute, breaking ties by id.
    pub fn compare(&self, a: &Player, b: &Player) -> std::cmp::Ordering {
        let primary = match self {
            PlayerOrder::Id => a.id.cmp(&b.id),
            PlayerOrder::Name => a.name.cmp(&b.name),
            PlayerOrder::Experience => a.experience.cmp(&b.experience),
            PlayerOrder::Birthday => a.birthday.cmp(&b.birthday),
            PlayerOrder::Level => a.level.cmp(&b.level),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for PlayerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerOrder::Id => "ID",
            PlayerOrder::Name => "NAME",
            PlayerOrder::Experience => "EXPERIENCE",
            PlayerOrder::Birthday => "BIRTHDAY",
            PlayerOrder::Level => "LEVEL",
        })
    }
}

impl FromStr for PlayerOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ID" => Ok(PlayerOrder::Id),
            "NAME" => Ok(PlayerOrder::Name),
            "EXPERIENCE" => Ok(PlayerOrder::Experience),
            "BIRTHDAY" => Ok(PlayerOrder::Birthday),
            "LEVEL" => Ok(PlayerOrder::Level),
            _ => Err(AppError::UnsupportedSort(s.to_string())),
        }
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub order: PlayerOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
            order: PlayerOrder::Id,
        }
    }
}

impl PageRequest {
    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}
