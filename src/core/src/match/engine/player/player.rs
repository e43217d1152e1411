use crate::r#match::{FormationSlot, PlayerSkills};
use nalgebra::Vector2;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// Cooldown above which a player can neither be tackled as carrier nor challenge.
pub const LOCKOUT_THRESHOLD: u32 = 10;

pub const POSSESSION_LOCK: u32 = 20;
pub const DISPOSSESSED_STUN: u32 = 60;
pub const FAILED_TACKLE_STUN: u32 = 150;
pub const BEATEN_DEFENDER_STUN: u32 = 40;
pub const FAILED_DRIBBLE_STUN: u32 = 50;
pub const KICK_COOLDOWN: u32 = 20;
pub const RESTART_TAKER_COOLDOWN: u32 = 15;
pub const GOALKEEPER_HANDLING_DELAY: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    /// +1 for the home side (attacks towards x = width), -1 for the away side.
    pub fn attack_direction(&self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

impl Display for TeamSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TeamSide::Home => write!(f, "HOME"),
            TeamSide::Away => write!(f, "AWAY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerRole {
    pub fn is_goalkeeper(&self) -> bool {
        *self == PlayerRole::Goalkeeper
    }

    /// Defenders and midfielders make up the tackling block.
    pub fn is_defensive_block(&self) -> bool {
        matches!(self, PlayerRole::Defender | PlayerRole::Midfielder)
    }
}

impl Display for PlayerRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PlayerRole::Goalkeeper => write!(f, "GK"),
            PlayerRole::Defender => write!(f, "DEF"),
            PlayerRole::Midfielder => write!(f, "MID"),
            PlayerRole::Forward => write!(f, "FWD"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchPlayer {
    pub id: u32,
    pub team: TeamSide,
    pub role: PlayerRole,
    pub position: Vector2<f32>,
    pub start_position: Vector2<f32>,
    pub cooldown: u32,
    pub handling_delay: u32,
    pub tackle_attempt: bool,
    pub skills: PlayerSkills,
}

impl MatchPlayer {
    pub fn from_slot(slot: &FormationSlot, skills: PlayerSkills) -> Self {
        MatchPlayer {
            id: slot.id,
            team: slot.side,
            role: slot.role,
            position: slot.position,
            start_position: slot.position,
            cooldown: 0,
            handling_delay: 0,
            tackle_attempt: false,
            skills,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.cooldown > LOCKOUT_THRESHOLD
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    pub fn reset_to_slot(&mut self) {
        self.position = self.start_position;
        self.cooldown = 0;
        self.handling_delay = 0;
        self.tackle_attempt = false;
    }

    pub fn distance_to(&self, point: &Vector2<f32>) -> f32 {
        (self.position - point).norm()
    }

    pub fn is_in_own_half(&self) -> bool {
        let halfway = crate::r#match::PITCH_WIDTH / 2.0;

        match self.team {
            TeamSide::Home => self.position.x < halfway,
            TeamSide::Away => self.position.x > halfway,
        }
    }
}
