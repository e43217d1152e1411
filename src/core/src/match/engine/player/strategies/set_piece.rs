use crate::r#match::{
    GameFlowState, KickKind, KickRequest, MatchField, MatchPlayer, MatchRng, PASS_POWER,
    PLAYER_SPEED, PlayerRole, RestartKind, SHOOT_POWER, SetPiece, StateProcessingContext,
    SteeringBehavior, centre_spot, cross_target, is_lane_safe,
};
use nalgebra::Vector2;
use rand::RngExt;

/// The taker walks until this close to the restart spot.
const SPOT_TOLERANCE: f32 = 20.0;
const LONG_THROW_DISTANCE: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetPieceAction {
    Approach(Vector2<f32>),
    Kick(KickRequest),
}

fn nearest_to<'p>(
    players: impl Iterator<Item = &'p MatchPlayer>,
    point: &Vector2<f32>,
) -> Option<&'p MatchPlayer> {
    players.min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)))
}

/// Kickoffs go to the midfielder nearest the centre spot, throw-ins and corners
/// to whoever of the restart team is nearest the spot.
pub fn select_restart_taker(field: &MatchField, kind: RestartKind, set_piece: &SetPiece) -> Option<u32> {
    let team = field.players.iter().filter(|p| p.team == set_piece.team);

    let taker = match kind {
        RestartKind::Kickoff => {
            let centre = centre_spot();

            nearest_to(team.clone().filter(|p| p.role == PlayerRole::Midfielder), &centre)
                .or_else(|| nearest_to(team.filter(|p| !p.role.is_goalkeeper()), &centre))
        }
        RestartKind::ThrowIn | RestartKind::Corner => nearest_to(team, &set_piece.position),
    };

    taker.map(|p| p.id)
}

pub fn decide_set_piece(
    ctx: &StateProcessingContext,
    flow: GameFlowState,
    set_piece: &SetPiece,
    rng: &mut MatchRng,
) -> Option<SetPieceAction> {
    let me = ctx.player;

    if ctx.distance_to(&set_piece.position) > SPOT_TOLERANCE {
        let step = SteeringBehavior::Arrive {
            target: set_piece.position,
            speed: PLAYER_SPEED * 1.5,
        }
        .calculate(me.position, ctx.delta_time);

        return Some(SetPieceAction::Approach(me.position + step.displacement));
    }

    let variance = 1.0 + rng.random::<f32>() * 0.2;

    let request = match flow {
        GameFlowState::ThrowIn => {
            let target = ctx
                .teammates()
                .filter(|p| is_lane_safe(&me.position, &p.position, ctx.opponents()))
                .max_by(|a, b| {
                    let progress_a = a.position.x * ctx.direction();
                    let progress_b = b.position.x * ctx.direction();
                    progress_a.total_cmp(&progress_b)
                });

            match target {
                Some(receiver) => KickRequest::new(
                    KickKind::ThrowIn {
                        receiver: Some(receiver.role),
                    },
                    receiver.position,
                    PASS_POWER * 1.5 * variance,
                ),
                None => KickRequest::new(
                    KickKind::ThrowIn { receiver: None },
                    set_piece.position + Vector2::new(ctx.direction() * LONG_THROW_DISTANCE, 0.0),
                    PASS_POWER * 1.8 * variance,
                ),
            }
        }
        GameFlowState::Corner => KickRequest::new(
            KickKind::CornerCross,
            cross_target(me.team, rng),
            SHOOT_POWER * 0.7 * variance,
        ),
        GameFlowState::Kickoff => {
            let outfield = || ctx.teammates().filter(|p| !p.role.is_goalkeeper());

            let same_lane = outfield()
                .filter(|p| (p.start_position.y - me.start_position.y).abs() < f32::EPSILON);

            let receiver = nearest_to(same_lane, &me.position)
                .or_else(|| nearest_to(outfield(), &me.position))?;

            KickRequest::new(
                KickKind::KickoffLayOff,
                receiver.position,
                PASS_POWER * 0.5 * variance,
            )
        }
        GameFlowState::Goalie | GameFlowState::Play => return None,
    };

    Some(SetPieceAction::Kick(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::r#match::{MatchContext, TeamSide};
    use rand::SeedableRng;

    fn setup() -> (MatchField, MatchContext, MatchRng) {
        let mut rng = MatchRng::seed_from_u64(31);
        let field = MatchField::new(&mut rng);
        (field, MatchContext::new(&SimulationConfig::default()), rng)
    }

    #[test]
    fn test_kickoff_taker_is_central_midfielder() {
        let (field, _, _) = setup();

        let home = SetPiece::new(TeamSide::Home, centre_spot());
        let away = SetPiece::new(TeamSide::Away, centre_spot());

        assert_eq!(select_restart_taker(&field, RestartKind::Kickoff, &home), Some(6));
        assert_eq!(select_restart_taker(&field, RestartKind::Kickoff, &away), Some(17));
    }

    #[test]
    fn test_throw_in_taker_is_nearest_to_spot() {
        let (field, _, _) = setup();
        let spot = SetPiece::new(TeamSide::Away, Vector2::new(640.0, 10.0));

        // away defender on the 100 line at x = 650
        assert_eq!(select_restart_taker(&field, RestartKind::ThrowIn, &spot), Some(12));
    }

    #[test]
    fn test_taker_walks_to_spot_first() {
        let (field, context, mut rng) = setup();
        let spot = SetPiece::new(TeamSide::Home, Vector2::new(150.0, 10.0));

        let ctx = StateProcessingContext::new(&field.players[1], &field, &context, 1.0);

        match decide_set_piece(&ctx, GameFlowState::ThrowIn, &spot, &mut rng) {
            Some(SetPieceAction::Approach(position)) => {
                assert!((position.y - (100.0 - PLAYER_SPEED * 1.5)).abs() < 1e-4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_corner_is_crossed_into_the_box() {
        let (mut field, context, mut rng) = setup();
        let spot = SetPiece::new(TeamSide::Home, Vector2::new(790.0, 10.0));
        field.players[8].position = spot.position;

        let ctx = StateProcessingContext::new(&field.players[8], &field, &context, 1.0);

        match decide_set_piece(&ctx, GameFlowState::Corner, &spot, &mut rng) {
            Some(SetPieceAction::Kick(request)) => {
                assert_eq!(request.kind, KickKind::CornerCross);
                assert!((request.target.x - 720.0).abs() < 1e-3);
                assert!(request.power >= SHOOT_POWER * 0.7 && request.power <= SHOOT_POWER * 0.7 * 1.2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_kickoff_lay_off_goes_to_same_lane() {
        let (mut field, context, mut rng) = setup();
        let spot = SetPiece::new(TeamSide::Home, centre_spot());
        field.players[6].position = centre_spot();

        let ctx = StateProcessingContext::new(&field.players[6], &field, &context, 1.0);

        match decide_set_piece(&ctx, GameFlowState::Kickoff, &spot, &mut rng) {
            Some(SetPieceAction::Kick(request)) => {
                assert_eq!(request.kind, KickKind::KickoffLayOff);
                // central forward
                assert_eq!(request.target, field.players[9].position);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_live_flow_has_no_set_piece() {
        let (mut field, context, mut rng) = setup();
        let spot = SetPiece::new(TeamSide::Home, centre_spot());
        field.players[6].position = centre_spot();

        let ctx = StateProcessingContext::new(&field.players[6], &field, &context, 1.0);

        assert!(decide_set_piece(&ctx, GameFlowState::Play, &spot, &mut rng).is_none());
    }
}
