//! Roster test utilities.
//!
//! Helpers for integration testing: player fixtures and JSON assertions.

use serde_json::{Value as JsonValue, json};

/// 2010-01-01T00:00:00Z in epoch millis.
pub const BIRTHDAY_2010: i64 = 1_262_304_000_000;

/// Create a test player with valid default values.
pub fn test_player(name: &str) -> TestPlayer {
    TestPlayer {
        name: name.to_string(),
        title: "Wanderer".to_string(),
        race: "HUMAN".to_string(),
        profession: "WARRIOR".to_string(),
        birthday: BIRTHDAY_2010,
        banned: None,
        experience: 0,
    }
}

/// A test player builder producing create request bodies.
#[derive(Debug, Clone)]
pub struct TestPlayer {
    pub name: String,
    pub title: String,
    pub race: String,
    pub profession: String,
    pub birthday: i64,
    pub banned: Option<bool>,
    pub experience: i32,
}

impl TestPlayer {
    /// Set the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the race (wire name, e.g. `ELF`).
    pub fn with_race(mut self, race: &str) -> Self {
        self.race = race.to_string();
        self
    }

    /// Set the profession (wire name, e.g. `CLERIC`).
    pub fn with_profession(mut self, profession: &str) -> Self {
        self.profession = profession.to_string();
        self
    }

    /// Set the birthday in epoch millis.
    pub fn with_birthday(mut self, birthday: i64) -> Self {
        self.birthday = birthday;
        self
    }

    pub fn with_experience(mut self, experience: i32) -> Self {
        self.experience = experience;
        self
    }

    /// Mark as banned.
    pub fn banned(mut self) -> Self {
        self.banned = Some(true);
        self
    }

    /// JSON body for a create request. `banned` is omitted unless set.
    pub fn to_json(&self) -> JsonValue {
        let mut body = json!({
            "name": self.name,
            "title": self.title,
            "race": self.race,
            "profession": self.profession,
            "birthday": self.birthday,
            "experience": self.experience,
        });
        if let (Some(banned), Some(obj)) = (self.banned, body.as_object_mut()) {
            obj.insert("banned".to_string(), JsonValue::Bool(banned));
        }
        body
    }

    /// JSON body with one field removed.
    pub fn to_json_without(&self, field: &str) -> JsonValue {
        let mut body = self.to_json();
        if let Some(obj) = body.as_object_mut() {
            obj.remove(field);
        }
        body
    }
}

/// Assertion helpers for JSON responses.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value is an error body.
    pub fn is_error(value: &Value) {
        assert!(
            value.get("error").and_then(Value::as_str).is_some(),
            "Expected an error body, got: {value}"
        );
    }

    /// Assert the `id` of every element of a JSON array.
    pub fn ids(value: &Value, expected: &[i64]) {
        let actual: Vec<i64> = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("id").and_then(Value::as_i64))
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(actual, expected, "id mismatch in: {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_omits_banned() {
        let body = test_player("Frodo").to_json();
        assert_eq!(body["name"], "Frodo");
        assert_eq!(body["birthday"], BIRTHDAY_2010);
        assert!(body.get("banned").is_none());
    }

    #[test]
    fn builder_overrides() {
        let body = test_player("Gimli")
            .with_race("DWARF")
            .with_profession("WARRIOR")
            .with_experience(700)
            .banned()
            .to_json();
        assert_eq!(body["race"], "DWARF");
        assert_eq!(body["experience"], 700);
        assert_eq!(body["banned"], true);
    }

    #[test]
    fn without_drops_field() {
        let body = test_player("Sam").to_json_without("title");
        assert!(body.get("title").is_none());
        assert::has_key(&body, "name");
    }
}
