//! Flat file storage for the draft assistant
//!
//! Every command talks to the others through CSV files:
//! - `models`: league teams and recorded draft picks
//! - `projections`: the projected player list used while drafting
//! - `teams`: team and pick file readers
//! - `league`: the wide per-team season file

pub mod league;
pub mod models;
pub mod projections;
pub mod teams;


pub use league::{read_league, write_league};
pub use models::*;
pub use projections::{default_projections_path, read_projections, write_projections};
pub use teams::{read_picks, read_teams, write_teams};
