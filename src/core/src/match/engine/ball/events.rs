use crate::r#match::{MatchContext, MatchField, MatchRng, RestartKind, SetPiece, TeamSide, centre_spot};
use log::debug;
use nalgebra::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BallEvent {
    Goal {
        scorer: TeamSide,
    },
    OutOfTouchline {
        receiving: TeamSide,
        position: Vector2<f32>,
    },
    OverGoalLine {
        corner_team: TeamSide,
        position: Vector2<f32>,
    },
}

pub struct BallEventDispatcher;

impl BallEventDispatcher {
    pub fn dispatch(
        event: BallEvent,
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
    ) {
        debug!("Ball event: {:?}", event);

        match event {
            BallEvent::Goal { scorer } => {
                context.score.increment(scorer);
                context
                    .commentary
                    .say(format!("GOALLLL! {} TEAM SCORES!", scorer));

                context.schedule_restart(
                    field,
                    RestartKind::Kickoff,
                    SetPiece::new(scorer.opponent(), centre_spot()),
                    rng,
                );
            }
            BallEvent::OutOfTouchline {
                receiving,
                position,
            } => {
                context.schedule_restart(
                    field,
                    RestartKind::ThrowIn,
                    SetPiece::new(receiving, position),
                    rng,
                );
            }
            BallEvent::OverGoalLine {
                corner_team,
                position,
            } => {
                context.schedule_restart(
                    field,
                    RestartKind::Corner,
                    SetPiece::new(corner_team, position),
                    rng,
                );
            }
        }
    }
}
