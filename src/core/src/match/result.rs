use crate::r#match::TeamSide;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchOutcome {
    Home,
    Draw,
    Away,
}

impl MatchOutcome {
    /// Winnings per unit staked, on top of the returned stake.
    pub fn payout_multiplier(&self) -> u64 {
        match self {
            MatchOutcome::Home | MatchOutcome::Away => 2,
            MatchOutcome::Draw => 3,
        }
    }
}

impl Display for MatchOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Home => write!(f, "HOME"),
            MatchOutcome::Draw => write!(f, "DRAW"),
            MatchOutcome::Away => write!(f, "AWAY"),
        }
    }
}

impl FromStr for MatchOutcome {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HOME" => Ok(MatchOutcome::Home),
            "DRAW" => Ok(MatchOutcome::Draw),
            "AWAY" => Ok(MatchOutcome::Away),
            other => Err(format!("unknown outcome: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new() -> Self {
        Score::default()
    }

    pub fn increment(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home = self.home.saturating_add(1),
            TeamSide::Away => self.away = self.away.saturating_add(1),
        }
    }

    pub fn get(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn is_leading(&self, side: TeamSide) -> bool {
        self.get(side) > self.get(side.opponent())
    }

    pub fn outcome(&self) -> MatchOutcome {
        if self.home > self.away {
            MatchOutcome::Home
        } else if self.away > self.home {
            MatchOutcome::Away
        } else {
            MatchOutcome::Draw
        }
    }
}
