//! ESPN fantasy league website scraping.
//!
//! Everything here is tied to the 2013-2014 era page markup: CSS selectors
//! and cell offsets are constants, and a layout change means editing them.

pub mod boxscore;
pub(crate) mod html;
pub mod http;
pub mod projections;
pub mod schedule;
pub mod types;
