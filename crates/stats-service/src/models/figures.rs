//! Compound cricket figures.
//!
//! Statistic rows store best-of fields as separate numeric + flag columns,
//! but admin payloads and report output use the conventional display forms:
//!
//! - high score: `"143*"` (trailing `*` marks not out)
//! - best bowling: `"4/77"` (wickets/runs, wickets at most 10)
//! - overs: `"47.3"` (whole overs, then balls 0-5)
//!
//! Each type round-trips between the display form (`FromStr`/`Display`)
//! and the stored columns.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Balls in a completed over.
pub const BALLS_PER_OVER: i32 = 6;

/// Maximum wickets a single bowler can take in an innings.
pub const MAX_WICKETS: i32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FigureError {
    #[error("invalid high score '{0}', expected e.g. '143' or '143*'")]
    HighScore(String),

    #[error("invalid bowling figures '{0}', expected e.g. '4/77'")]
    BowlingFigures(String),

    #[error("invalid overs '{0}', expected e.g. '47.3'")]
    Overs(String),
}

/// A batting high score: runs plus a not-out marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    pub runs: i32,
    pub not_out: bool,
}

impl FromStr for HighScore {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, not_out) = match s.strip_suffix('*') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FigureError::HighScore(s.to_string()));
        }

        let runs: i32 = digits
            .parse()
            .map_err(|_| FigureError::HighScore(s.to_string()))?;

        Ok(HighScore { runs, not_out })
    }
}

impl fmt::Display for HighScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.not_out { "*" } else { "" };
        write!(f, "{}{}", self.runs, marker)
    }
}

/// Bowling figures for a single innings: wickets and runs conceded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BowlingFigures {
    pub wickets: i32,
    pub runs: i32,
}

impl FromStr for BowlingFigures {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (wickets_str, runs_str) = s
            .split_once('/')
            .ok_or_else(|| FigureError::BowlingFigures(s.to_string()))?;

        if wickets_str.is_empty()
            || runs_str.is_empty()
            || !wickets_str.bytes().all(|b| b.is_ascii_digit())
            || !runs_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(FigureError::BowlingFigures(s.to_string()));
        }

        let wickets: i32 = wickets_str
            .parse()
            .map_err(|_| FigureError::BowlingFigures(s.to_string()))?;
        let runs: i32 = runs_str
            .parse()
            .map_err(|_| FigureError::BowlingFigures(s.to_string()))?;

        if wickets > MAX_WICKETS {
            return Err(FigureError::BowlingFigures(s.to_string()));
        }

        Ok(BowlingFigures { wickets, runs })
    }
}

impl fmt::Display for BowlingFigures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.wickets, self.runs)
    }
}

/// Overs bowled: whole overs plus leftover balls (0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overs {
    pub overs: i32,
    pub balls: i32,
}

impl Overs {
    /// Total balls represented by these overs.
    pub fn total_balls(&self) -> i32 {
        self.overs * BALLS_PER_OVER + self.balls
    }

    /// Build overs from a total ball count.
    pub fn from_balls(total: i32) -> Self {
        Overs {
            overs: total / BALLS_PER_OVER,
            balls: total % BALLS_PER_OVER,
        }
    }
}

impl FromStr for Overs {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (overs_str, balls_str) = match s.split_once('.') {
            Some((o, b)) => (o, b),
            None => (s, "0"),
        };

        if overs_str.is_empty()
            || balls_str.is_empty()
            || !overs_str.bytes().all(|b| b.is_ascii_digit())
            || !balls_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(FigureError::Overs(s.to_string()));
        }

        let overs: i32 = overs_str
            .parse()
            .map_err(|_| FigureError::Overs(s.to_string()))?;
        let balls: i32 = balls_str
            .parse()
            .map_err(|_| FigureError::Overs(s.to_string()))?;

        if balls >= BALLS_PER_OVER {
            return Err(FigureError::Overs(s.to_string()));
        }

        Ok(Overs { overs, balls })
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.overs, self.balls)
    }
}
