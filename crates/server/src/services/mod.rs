//! Player services.
//!
//! Validation rules and the operations the HTTP layer drives.

pub mod player;
pub mod validation;

pub use player::PlayerService;
pub use validation::{parse_player_id, validate_create, validate_update};
