//! Level derivation from accumulated experience.
//!
//! Levels follow a triangular progression: reaching level `n + 1` requires
//! `50 * (n + 1) * (n + 2)` total experience.

/// Level reached with the given amount of experience.
///
/// `experience` must be non-negative; callers validate it before deriving.
pub fn level_for(experience: i32) -> i32 {
    let root = (2500.0 + 200.0 * f64::from(experience)).sqrt();
    ((root - 50.0) / 100.0) as i32
}

/// Experience still missing to reach `level + 1`.
pub fn until_next_level(level: i32, experience: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}

/// Derived progression fields for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: i32,
    pub until_next_level: i32,
}

impl Progress {
    /// Derive level and remaining experience from total experience.
    pub fn from_experience(experience: i32) -> Self {
        let level = level_for(experience);
        Self {
            level,
            until_next_level: until_next_level(level, experience),
        }
    }
}
