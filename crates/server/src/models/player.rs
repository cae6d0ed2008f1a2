//! Player model.
//!
//! A player is a game character record. `level` and `until_next_level` are
//! derived from `experience` and never accepted from clients: neither
//! [`CreatePlayer`] nor [`UpdatePlayer`] has those fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::level::Progress;

/// Character race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Race::Human,
        Race::Dwarf,
        Race::Elf,
        Race::Giant,
        Race::Orc,
        Race::Troll,
        Race::Hobbit,
    ];

    /// Stored and serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Human => "HUMAN",
            Race::Dwarf => "DWARF",
            Race::Elf => "ELF",
            Race::Giant => "GIANT",
            Race::Orc => "ORC",
            Race::Troll => "TROLL",
            Race::Hobbit => "HOBBIT",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Race::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("race", s))
    }
}

/// Character profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub const ALL: [Profession; 8] = [
        Profession::Warrior,
        Profession::Rogue,
        Profession::Sorcerer,
        Profession::Cleric,
        Profession::Paladin,
        Profession::Nazgul,
        Profession::Warlock,
        Profession::Druid,
    ];

    /// Stored and serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Warrior => "WARRIOR",
            Profession::Rogue => "ROGUE",
            Profession::Sorcerer => "SORCERER",
            Profession::Cleric => "CLERIC",
            Profession::Paladin => "PALADIN",
            Profession::Nazgul => "NAZGUL",
            Profession::Warlock => "WARLOCK",
            Profession::Druid => "DRUID",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profession {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profession::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("profession", s))
    }
}

/// An enumerated column held a name that no variant matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Stored player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, 1-12 characters.
    pub name: String,

    /// Title, up to 30 characters.
    pub title: String,

    pub race: Race,

    pub profession: Profession,

    /// Milliseconds since the Unix epoch.
    pub birthday: i64,

    pub banned: bool,

    /// Total experience, 0-10,000,000.
    pub experience: i32,

    /// Derived from `experience`.
    pub level: i32,

    /// Derived from `level` and `experience`.
    pub until_next_level: i32,
}

impl Player {
    /// Set experience and recompute the derived fields.
    pub fn set_experience(&mut self, experience: i32) {
        let progress = Progress::from_experience(experience);
        self.experience = experience;
        self.level = progress.level;
        self.until_next_level = progress.until_next_level;
    }
}

/// Input for creating a player.
///
/// Every field is optional so that a missing field surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayer {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

/// Sparse update for an existing player.
///
/// Present fields overwrite the stored value; absent (or `null`) fields keep it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayer {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

impl UpdatePlayer {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.race.is_none()
            && self.profession.is_none()
            && self.birthday.is_none()
            && self.banned.is_none()
            && self.experience.is_none()
    }

    /// Merge this update onto a stored player.
    pub fn apply_to(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(title) = self.title {
            player.title = title;
        }
        if let Some(race) = self.race {
            player.race = race;
        }
        if let Some(profession) = self.profession {
            player.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            player.birthday = birthday;
        }
        if let Some(banned) = self.banned {
            player.banned = banned;
        }
        if let Some(experience) = self.experience {
            player.set_experience(experience);
        }
    }
}

/// A validated player awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl NewPlayer {
    /// Attach the store-assigned identifier.
    pub fn into_player(self, id: i64) -> Player {
        Player {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            banned: self.banned,
            experience: self.experience,
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }
}
