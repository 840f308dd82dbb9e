use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Year string ("2021") -> two-digit month strings ("01".."12"), sorted.
pub type ArchiveIndex = BTreeMap<String, Vec<String>>;

/// Year -> month -> classified games, the layout of the games file.
/// Months with no qualifying games are absent, not empty.
pub type GamesByPeriod = BTreeMap<String, BTreeMap<String, Vec<ClassifiedGame>>>;

/// Winner label recorded for drawn games.
pub const DRAW: &str = "Draw";

/// One seat of a game as the monthly endpoint reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSeat {
    pub username: String,
    pub result: String,
}

/// A raw game record. The API sends far more fields; everything beyond the
/// two seats and the time class is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub white: PlayerSeat,
    pub black: PlayerSeat,
    pub time_class: String,
}

/// Per-seat outcome vocabulary of the chess.com API. Codes outside this
/// set fail to parse; they are never mapped to a default class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Win,
    Lose,
    Checkmated,
    Timeout,
    Resigned,
    ThreeCheck,
    Agreed,
    Repetition,
    Stalemate,
    Insufficient,
    FiftyMove,
    TimeVsInsufficient,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl ResultCode {
    pub fn parse(code: &str) -> anyhow::Result<Self> {
        Ok(match code {
            "win" => Self::Win,
            "lose" => Self::Lose,
            "checkmated" => Self::Checkmated,
            "timeout" => Self::Timeout,
            "resigned" => Self::Resigned,
            "threecheck" => Self::ThreeCheck,
            "agreed" => Self::Agreed,
            "repetition" => Self::Repetition,
            "stalemate" => Self::Stalemate,
            "insufficient" => Self::Insufficient,
            "50move" => Self::FiftyMove,
            "timevsinsufficient" => Self::TimeVsInsufficient,
            "abandoned" => Self::Abandoned,
            other => anyhow::bail!("unknown result code {other:?}"),
        })
    }

    /// Which side of the win/loss/draw partition the code falls on.
    pub fn outcome(self) -> Outcome {
        match self {
            Self::Win => Outcome::Win,
            Self::Lose | Self::Checkmated | Self::Timeout | Self::Resigned | Self::ThreeCheck => {
                Outcome::Loss
            }
            Self::Agreed
            | Self::Repetition
            | Self::Stalemate
            | Self::Insufficient
            | Self::FiftyMove
            | Self::TimeVsInsufficient
            | Self::Abandoned => Outcome::Draw,
        }
    }
}

/// A game reduced to what aggregation needs. `winner` is one of the two
/// usernames (as the API spelled them) or [`DRAW`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedGame {
    pub white: String,
    pub black: String,
    pub winner: String,
}

/// Win/loss/draw counters for one month, seen from the tracked player's
/// side. Losses are attributed to the seat the tracked player held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTally {
    pub wins_as_white: u32,
    pub wins_as_black: u32,
    pub losses_as_white: u32,
    pub losses_as_black: u32,
    pub draws: u32,
}

impl MonthlyTally {
    /// Count one classified game. Exactly one counter moves per call; a
    /// winner label matching neither seat is a data-integrity error.
    pub fn record(&mut self, game: &ClassifiedGame, tracked: &str) -> anyhow::Result<()> {
        if game.winner == DRAW {
            self.draws += 1;
        } else if game.winner == game.white {
            if game.white.eq_ignore_ascii_case(tracked) {
                self.wins_as_white += 1;
            } else {
                self.losses_as_black += 1;
            }
        } else if game.winner == game.black {
            if game.black.eq_ignore_ascii_case(tracked) {
                self.wins_as_black += 1;
            } else {
                self.losses_as_white += 1;
            }
        } else {
            anyhow::bail!(
                "winner {:?} matches neither {:?} nor {:?}",
                game.winner,
                game.white,
                game.black
            );
        }
        Ok(())
    }

    pub fn total(&self) -> u32 {
        self.wins_as_white
            + self.wins_as_black
            + self.losses_as_white
            + self.losses_as_black
            + self.draws
    }
}
