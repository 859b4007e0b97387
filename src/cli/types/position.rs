//! Fantasy football position and lineup slot types.

use crate::error::FflError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions as ESPN labels them.
///
/// # Examples
///
/// ```rust
/// use ffl_draft::Position;
///
/// let dst: Position = "D/ST".parse().unwrap();
/// assert_eq!(dst, Position::DST);
/// assert_eq!(Position::QB.to_string(), "QB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DST,
    K,
    P,
}

impl Position {
    pub const ALL: [Position; 7] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
        Position::K,
        Position::P,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "D/ST",
            Position::K => "K",
            Position::P => "P",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "D/ST" | "DST" | "DEF" => Ok(Position::DST),
            "K" => Ok(Position::K),
            "P" => Ok(Position::P),
            _ => Err(FflError::InvalidPosition {
                position: s.trim().to_string(),
            }),
        }
    }
}

/// A lineup slot: either a single position or a two-position combo slot
/// such as `RB/WR`. `D/ST` is a single position despite the slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Single(Position),
    Combo(Position, Position),
}

/// Slots used when bucketing a drafted roster.
pub const DRAFT_SLOTS: [Slot; 8] = [
    Slot::Single(Position::QB),
    Slot::Single(Position::RB),
    Slot::Combo(Position::RB, Position::WR),
    Slot::Single(Position::WR),
    Slot::Combo(Position::WR, Position::TE),
    Slot::Single(Position::TE),
    Slot::Single(Position::DST),
    Slot::Single(Position::K),
];

/// Slots tracked per week in the league file (draft slots plus punter).
pub const LEAGUE_SLOTS: [Slot; 9] = [
    Slot::Single(Position::QB),
    Slot::Single(Position::RB),
    Slot::Combo(Position::RB, Position::WR),
    Slot::Single(Position::WR),
    Slot::Combo(Position::WR, Position::TE),
    Slot::Single(Position::TE),
    Slot::Single(Position::DST),
    Slot::Single(Position::K),
    Slot::Single(Position::P),
];

impl Slot {
    pub fn is_combo(&self) -> bool {
        matches!(self, Slot::Combo(..))
    }

    /// Whether a player at `pos` may fill this slot.
    pub fn accepts(&self, pos: Position) -> bool {
        match *self {
            Slot::Single(p) => p == pos,
            Slot::Combo(a, b) => a == pos || b == pos,
        }
    }
}

impl From<Position> for Slot {
    fn from(pos: Position) -> Self {
        Slot::Single(pos)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Single(p) => write!(f, "{}", p),
            Slot::Combo(a, b) => write!(f, "{}/{}", a, b),
        }
    }
}

impl FromStr for Slot {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(pos) = trimmed.parse::<Position>() {
            return Ok(Slot::Single(pos));
        }
        match trimmed.split_once('/') {
            Some((a, b)) => Ok(Slot::Combo(a.parse()?, b.parse()?)),
            None => Err(FflError::InvalidPosition {
                position: trimmed.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_conversion() {
        for pos in Position::ALL {
            assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
        }
        assert_eq!("dst".parse::<Position>().unwrap(), Position::DST);
        assert_eq!("DEF".parse::<Position>().unwrap(), Position::DST);
        assert!("LB".parse::<Position>().is_err());
    }

    #[test]
    fn test_slot_parsing_keeps_dst_single() {
        assert_eq!(
            "D/ST".parse::<Slot>().unwrap(),
            Slot::Single(Position::DST)
        );
        assert_eq!(
            "RB/WR".parse::<Slot>().unwrap(),
            Slot::Combo(Position::RB, Position::WR)
        );
        assert!("RB/LB".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_accepts() {
        let flex = Slot::Combo(Position::WR, Position::TE);
        assert!(flex.accepts(Position::WR));
        assert!(flex.accepts(Position::TE));
        assert!(!flex.accepts(Position::RB));
        assert!(Slot::Single(Position::K).accepts(Position::K));
        assert!(!Slot::Single(Position::K).accepts(Position::P));
    }

    #[test]
    fn test_slot_labels_match_league_headers() {
        let labels: Vec<String> = LEAGUE_SLOTS.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            vec!["QB", "RB", "RB/WR", "WR", "WR/TE", "TE", "D/ST", "K", "P"]
        );
    }
}
