use crate::r#match::ball::Ball;
use crate::r#match::{MatchPlayer, MatchRng, PlayerSkills, TeamSide, formation_slots};
use nalgebra::Vector2;

pub const PITCH_WIDTH: f32 = 800.0;
pub const PITCH_HEIGHT: f32 = 500.0;
pub const GOAL_SIZE: f32 = 140.0;
pub const PENALTY_AREA_DEPTH: f32 = 120.0;
pub const PENALTY_AREA_MARGIN: f32 = 10.0;

/// Distance players keep from every pitch edge.
pub const PLAYER_MARGIN: f32 = 10.0;

pub fn centre_spot() -> Vector2<f32> {
    Vector2::new(PITCH_WIDTH / 2.0, PITCH_HEIGHT / 2.0)
}

/// Centre of the goal `side` attacks.
pub fn goal_centre(side: TeamSide) -> Vector2<f32> {
    match side {
        TeamSide::Home => Vector2::new(PITCH_WIDTH, PITCH_HEIGHT / 2.0),
        TeamSide::Away => Vector2::new(0.0, PITCH_HEIGHT / 2.0),
    }
}

pub fn is_within_goal_mouth(y: f32) -> bool {
    (y - PITCH_HEIGHT / 2.0).abs() < GOAL_SIZE / 2.0
}

pub fn clamp_to_pitch(position: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(
        position.x.clamp(PLAYER_MARGIN, PITCH_WIDTH - PLAYER_MARGIN),
        position.y.clamp(PLAYER_MARGIN, PITCH_HEIGHT - PLAYER_MARGIN),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct PenaltyArea {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl PenaltyArea {
    /// The area `side` defends, measured from its own goal line.
    pub fn defended_by(side: TeamSide) -> Self {
        let depth = PENALTY_AREA_DEPTH + PENALTY_AREA_MARGIN;

        match side {
            TeamSide::Home => PenaltyArea {
                min: Vector2::new(0.0, 0.0),
                max: Vector2::new(depth, PITCH_HEIGHT),
            },
            TeamSide::Away => PenaltyArea {
                min: Vector2::new(PITCH_WIDTH - depth, 0.0),
                max: Vector2::new(PITCH_WIDTH, PITCH_HEIGHT),
            },
        }
    }

    pub fn contains(&self, point: &Vector2<f32>) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

pub struct MatchField {
    pub ball: Ball,
    /// Indexed by player id.
    pub players: Vec<MatchPlayer>,
}

impl MatchField {
    pub fn new(rng: &mut MatchRng) -> Self {
        let players = [TeamSide::Home, TeamSide::Away]
            .into_iter()
            .flat_map(formation_slots)
            .map(|slot| MatchPlayer::from_slot(&slot, PlayerSkills::for_role(slot.role, rng)))
            .collect();

        MatchField {
            ball: Ball::with_coord(PITCH_WIDTH, PITCH_HEIGHT),
            players,
        }
    }

    /// Back to the formation. Skills are re-rolled only when an rng is handed in.
    pub fn reset_formation(&mut self, reroll: Option<&mut MatchRng>) {
        self.players.iter_mut().for_each(|p| p.reset_to_slot());

        if let Some(rng) = reroll {
            for player in self.players.iter_mut() {
                player.skills = PlayerSkills::for_role(player.role, rng);
            }
        }
    }

    pub fn player(&self, id: u32) -> Option<&MatchPlayer> {
        self.players.get(id as usize)
    }

    pub fn player_mut(&mut self, id: u32) -> Option<&mut MatchPlayer> {
        self.players.get_mut(id as usize)
    }

    pub fn owner(&self) -> Option<&MatchPlayer> {
        self.ball.current_owner.and_then(|id| self.player(id))
    }

    /// Snaps the ball to its carrier, dropping ownership that points nowhere.
    pub fn pin_ball_to_owner(&mut self) {
        let Some(owner_id) = self.ball.current_owner else {
            return;
        };

        match self.players.get(owner_id as usize) {
            Some(owner) => self.ball.pin_to(owner),
            None => self.ball.current_owner = None,
        }
    }

    pub fn clamp_players(&mut self) {
        for player in self.players.iter_mut() {
            player.position = clamp_to_pitch(player.position);
        }
    }

    pub fn positions(&self) -> Vec<Vector2<f32>> {
        self.players.iter().map(|p| p.position).collect()
    }
}
