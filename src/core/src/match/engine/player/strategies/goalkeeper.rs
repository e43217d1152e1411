use crate::r#match::{
    CarrierAction, KickKind, KickRequest, MatchRng, PASS_POWER, PITCH_HEIGHT, PITCH_WIDTH,
    PLAYER_MARGIN, PLAYER_SPEED, PlayerRole, SHOOT_POWER, StateProcessingContext, TeamSide,
    is_lane_safe,
};
use nalgebra::Vector2;
use rand::RngExt;

/// Depth of the band a keeper shuffles in while holding the ball.
const HANDLING_BAND: f32 = 50.0;
const SAFE_OUTLET_BONUS: f32 = 1000.0;

fn role_weight(role: PlayerRole) -> f32 {
    match role {
        PlayerRole::Defender => 1000.0,
        PlayerRole::Midfielder => 500.0,
        _ => 0.0,
    }
}

pub fn decide_goalkeeper_with_ball(
    ctx: &StateProcessingContext,
    rng: &mut MatchRng,
) -> CarrierAction {
    let keeper = ctx.player;

    if keeper.handling_delay > 0 {
        let (min_x, max_x) = match keeper.team {
            TeamSide::Home => (PLAYER_MARGIN, HANDLING_BAND),
            TeamSide::Away => (PITCH_WIDTH - HANDLING_BAND, PITCH_WIDTH - PLAYER_MARGIN),
        };

        let shuffle = Vector2::new(
            ctx.direction() * PLAYER_SPEED * 0.1,
            rng.random::<f32>() - 0.5,
        ) * ctx.delta_time;

        let position = keeper.position + shuffle;

        return CarrierAction::Move(Vector2::new(position.x.clamp(min_x, max_x), position.y));
    }

    let outlet = ctx
        .teammates()
        .filter(|p| !p.role.is_goalkeeper())
        .filter(|p| is_lane_safe(&keeper.position, &p.position, ctx.opponents()))
        .map(|p| {
            let score = role_weight(p.role) + SAFE_OUTLET_BONUS - ctx.distance_to(&p.position);
            (p, score)
        })
        .max_by(|(_, a), (_, b)| a.total_cmp(b));

    match outlet {
        Some((receiver, _)) => CarrierAction::Kick(KickRequest::new(
            KickKind::KeeperDistribution {
                receiver: receiver.role,
            },
            receiver.position,
            PASS_POWER * 1.5,
        )),
        None => {
            let x = match keeper.team {
                TeamSide::Home => PITCH_WIDTH * 0.4,
                TeamSide::Away => PITCH_WIDTH * 0.6,
            };

            CarrierAction::Kick(KickRequest::new(
                KickKind::KeeperLaunch,
                Vector2::new(x, PITCH_HEIGHT / 2.0),
                SHOOT_POWER * 1.2,
            ))
        }
    }
}
