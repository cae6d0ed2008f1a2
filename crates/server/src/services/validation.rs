//! Player field validation and id parsing.
//!
//! Create requires every field; update checks only the fields it carries.
//! Either way a single violation rejects the whole request.

use chrono::{DateTime, Datelike};

use crate::error::{AppError, AppResult};
use crate::models::{CreatePlayer, NewPlayer, Progress, UpdatePlayer};

/// Maximum name length in characters.
pub const MAX_NAME_LEN: usize = 12;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 30;

/// Maximum total experience.
pub const MAX_EXPERIENCE: i32 = 10_000_000;

/// Earliest allowed birth year (UTC).
pub const MIN_BIRTH_YEAR: i32 = 2000;

/// Latest allowed birth year (UTC).
pub const MAX_BIRTH_YEAR: i32 = 3000;

/// Parse a caller-supplied player id.
///
/// Only positive integers are ids; empty, non-numeric, zero and negative
/// values are rejected with [`AppError::InvalidId`].
pub fn parse_player_id(raw: &str) -> AppResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId(raw.to_string())),
    }
}

/// Validate a create request and derive the stored fields.
///
/// `banned` defaults to `false`.
pub fn validate_create(input: CreatePlayer) -> AppResult<NewPlayer> {
    let name = required(input.name, "name")?;
    let title = required(input.title, "title")?;
    let race = required(input.race, "race")?;
    let profession = required(input.profession, "profession")?;
    let birthday = required(input.birthday, "birthday")?;
    let experience = required(input.experience, "experience")?;

    check_name(&name)?;
    check_title(&title)?;
    check_birthday(birthday)?;
    check_experience(experience)?;

    let progress = Progress::from_experience(experience);

    Ok(NewPlayer {
        name,
        title,
        race,
        profession,
        birthday,
        banned: input.banned.unwrap_or(false),
        experience,
        level: progress.level,
        until_next_level: progress.until_next_level,
    })
}

/// Validate the fields present in an update.
pub fn validate_update(input: &UpdatePlayer) -> AppResult<()> {
    if let Some(name) = &input.name {
        check_name(name)?;
    }
    if let Some(title) = &input.title {
        check_title(title)?;
    }
    if let Some(birthday) = input.birthday {
        check_birthday(birthday)?;
    }
    if let Some(experience) = input.experience {
        check_experience(experience)?;
    }
    Ok(())
}

fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

fn check_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn check_title(title: &str) -> AppResult<()> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn check_experience(experience: i32) -> AppResult<()> {
    if !(0..=MAX_EXPERIENCE).contains(&experience) {
        return Err(AppError::validation(format!(
            "experience must be between 0 and {MAX_EXPERIENCE}"
        )));
    }
    Ok(())
}

fn check_birthday(birthday: i64) -> AppResult<()> {
    if birthday < 0 {
        return Err(AppError::validation("birthday must not be negative"));
    }
    let year = DateTime::from_timestamp_millis(birthday)
        .map(|dt| dt.year())
        .ok_or_else(|| AppError::validation("birthday is out of range"))?;
    if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) {
        return Err(AppError::validation(format!(
            "birthday year must be between {MIN_BIRTH_YEAR} and {MAX_BIRTH_YEAR}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{Profession, Race};

    /// 2010-01-01T00:00:00Z
    const BIRTHDAY_2010: i64 = 1_262_304_000_000;

    fn valid_input() -> CreatePlayer {
        CreatePlayer {
            name: Some("Ragnar".to_string()),
            title: Some("Sea King".to_string()),
            race: Some(Race::Human),
            profession: Some(Profession::Warrior),
            birthday: Some(BIRTHDAY_2010),
            banned: None,
            experience: Some(1000),
        }
    }

    fn assert_invalid(input: CreatePlayer) {
        assert!(
            matches!(validate_create(input), Err(AppError::Validation(_))),
            "expected validation error"
        );
    }

    #[test]
    fn check_id_accepts_positive_integers() {
        assert_eq!(parse_player_id("42").unwrap(), 42);
        assert_eq!(parse_player_id("1").unwrap(), 1);
    }

    #[test]
    fn check_id_rejects_garbage() {
        for raw in ["", "0", "-3", "abc", "4.5", " 7", "99999999999999999999"] {
            assert!(
                matches!(parse_player_id(raw), Err(AppError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn valid_create_derives_fields() {
        let player = validate_create(valid_input()).unwrap();
        assert!(!player.banned);
        assert_eq!(player.level, 4);
        assert_eq!(player.until_next_level, 500);
    }

    #[test]
    fn banned_is_kept_when_supplied() {
        let mut input = valid_input();
        input.banned = Some(true);
        assert!(validate_create(input).unwrap().banned);
    }

    #[test]
    fn every_required_field_is_checked() {
        let mut input = valid_input();
        input.name = None;
        assert_invalid(input);

        let mut input = valid_input();
        input.title = None;
        assert_invalid(input);

        let mut input = valid_input();
        input.race = None;
        assert_invalid(input);

        let mut input = valid_input();
        input.profession = None;
        assert_invalid(input);

        let mut input = valid_input();
        input.birthday = None;
        assert_invalid(input);

        let mut input = valid_input();
        input.experience = None;
        assert_invalid(input);
    }

    #[test]
    fn name_length_limits() {
        let mut input = valid_input();
        input.name = Some(String::new());
        assert_invalid(input);

        let mut input = valid_input();
        input.name = Some("a".repeat(13));
        assert_invalid(input);

        let mut input = valid_input();
        input.name = Some("a".repeat(12));
        assert!(validate_create(input).is_ok());
    }

    #[test]
    fn title_length_limit() {
        let mut input = valid_input();
        input.title = Some("t".repeat(31));
        assert_invalid(input);

        let mut input = valid_input();
        input.title = Some(String::new());
        assert!(validate_create(input).is_ok());
    }

    #[test]
    fn experience_range() {
        let mut input = valid_input();
        input.experience = Some(-1);
        assert_invalid(input);

        let mut input = valid_input();
        input.experience = Some(10_000_001);
        assert_invalid(input);

        let mut input = valid_input();
        input.experience = Some(10_000_000);
        assert!(validate_create(input).is_ok());
    }

    #[test]
    fn birthday_window() {
        let mut input = valid_input();
        input.birthday = Some(-1);
        assert_invalid(input);

        // 1999-12-31T23:59:59Z
        let mut input = valid_input();
        input.birthday = Some(946_684_799_000);
        assert_invalid(input);

        // 2000-01-01T00:00:00Z
        let mut input = valid_input();
        input.birthday = Some(946_684_800_000);
        assert!(validate_create(input).is_ok());

        // 3001-01-01T00:00:00Z
        let mut input = valid_input();
        input.birthday = Some(32_535_216_000_000);
        assert_invalid(input);
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(validate_update(&UpdatePlayer::default()).is_ok());
        assert!(
            validate_update(&UpdatePlayer {
                banned: Some(true),
                ..Default::default()
            })
            .is_ok()
        );
        assert!(
            validate_update(&UpdatePlayer {
                name: Some(String::new()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_update(&UpdatePlayer {
                experience: Some(-5),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_update(&UpdatePlayer {
                birthday: Some(0),
                ..Default::default()
            })
            .is_err()
        );
    }
}
