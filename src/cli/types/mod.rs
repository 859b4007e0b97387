//! Type-safe wrappers and enums shared by the commands.

pub mod ids;
pub mod owner;
pub mod position;
pub mod time;

pub use ids::{LeagueId, TeamId};
pub use owner::{Owner, FREE_AGENT};
pub use position::{Position, Slot, DRAFT_SLOTS, LEAGUE_SLOTS};
pub use time::{Period, Season, PLAYOFF_ROUNDS, REGULAR_SEASON_WEEKS};
