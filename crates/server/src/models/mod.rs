//! Domain models.

pub mod level;
pub mod player;

pub use level::{Progress, level_for, until_next_level};
pub use player::{CreatePlayer, NewPlayer, Player, Profession, Race, UnknownVariant, UpdatePlayer};
