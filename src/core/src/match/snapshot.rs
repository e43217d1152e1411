use crate::betting::BetSlip;
use crate::r#match::{
    FootballEngine, GameFlowState, MatchOutcome, MatchState, PlayerRole, Score, TeamSide,
};
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub team: TeamSide,
    pub role: PlayerRole,
    pub position: Vector2<f32>,
    pub cooldown: u32,
    pub has_ball: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallSnapshot {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub owner: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BettingSnapshot {
    pub balance: u64,
    pub stake: u64,
    pub selection: Option<MatchOutcome>,
}

/// Immutable picture of one frame, published to whoever renders the match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub frame: u64,
    pub match_state: MatchState,
    pub flow: GameFlowState,
    pub minute: u8,
    pub score: Score,
    pub players: Vec<PlayerSnapshot>,
    pub ball: BallSnapshot,
    pub commentary: String,
    pub restart_team: TeamSide,
    pub restart_position: Vector2<f32>,
    pub betting: BettingSnapshot,
}

impl MatchSnapshot {
    pub fn capture(
        frame: u64,
        match_state: MatchState,
        engine: &FootballEngine,
        slip: &BetSlip,
    ) -> Self {
        let field = &engine.field;
        let context = &engine.context;
        let set_piece = context.flow.set_piece();

        MatchSnapshot {
            frame,
            match_state,
            flow: context.flow.state(),
            minute: context.time.minute,
            score: context.score,
            players: field
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    team: p.team,
                    role: p.role,
                    position: p.position,
                    cooldown: p.cooldown,
                    has_ball: field.ball.current_owner == Some(p.id),
                })
                .collect(),
            ball: BallSnapshot {
                position: field.ball.position,
                velocity: field.ball.velocity,
                owner: field.ball.current_owner,
            },
            commentary: context.commentary.latest().to_string(),
            restart_team: set_piece.team,
            restart_position: set_piece.position,
            betting: BettingSnapshot {
                balance: slip.balance(),
                stake: slip.stake(),
                selection: slip.selection(),
            },
        }
    }
}
