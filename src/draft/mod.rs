//! Live draft support: replacement values, leaderboards, team summaries and
//! the interactive loop that keeps them current after every pick.

pub mod board;
pub mod player;
pub mod report;
pub mod session;
pub mod summary;

pub use board::{DraftBoard, PlayerFilter, ReplacementEntry, DEFAULT_TOP_N};
pub use player::DraftPlayer;
pub use session::{DraftSession, Prompter};
pub use summary::{state_of_draft, team_draft_summary, DraftState, TeamStanding, TeamSummary};
