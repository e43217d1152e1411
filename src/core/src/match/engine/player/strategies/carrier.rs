use crate::r#match::{
    KickKind, KickRequest, MatchRng, PASS_POWER, PITCH_HEIGHT, PITCH_WIDTH, PassEvaluator,
    PlayerRole, SHOOT_POWER, SPRINT_SPEED, StateProcessingContext, TeamSide,
    decide_goalkeeper_with_ball,
};
use log::debug;
use nalgebra::Vector2;
use rand::RngExt;

const CLOSE_SHOT_DISTANCE: f32 = 150.0;
const LONG_SHOT_DISTANCE: f32 = 300.0;
const TAKE_ON_DISTANCE: f32 = 35.0;
const MIN_PASS_SCORE: f32 = 50.0;
const DRIBBLE_NUDGE_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TakeOnResult {
    Beaten {
        defender_id: u32,
        position: Vector2<f32>,
    },
    Lost {
        defender_id: u32,
        nudge: Vector2<f32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarrierAction {
    Kick(KickRequest),
    TakeOn(TakeOnResult),
    Move(Vector2<f32>),
    Hold,
}

#[derive(Debug, Clone, Copy)]
pub struct CarrierCandidate {
    pub evaluator: &'static str,
    pub action: CarrierAction,
}

type CarrierEvaluator = fn(&StateProcessingContext, &mut MatchRng) -> Option<CarrierAction>;

/// Tried in order; the first evaluator to commit wins.
pub const CARRIER_EVALUATORS: [(&str, CarrierEvaluator); 5] = [
    ("shoot", evaluate_shot),
    ("cross", evaluate_cross),
    ("pass", evaluate_pass),
    ("take_on", evaluate_take_on),
    ("advance", evaluate_advance),
];

pub fn decide_with_ball(ctx: &StateProcessingContext, rng: &mut MatchRng) -> CarrierCandidate {
    if ctx.player.role.is_goalkeeper() {
        return CarrierCandidate {
            evaluator: "goalkeeper",
            action: decide_goalkeeper_with_ball(ctx, rng),
        };
    }

    let candidate = CARRIER_EVALUATORS
        .iter()
        .find_map(|(name, evaluate)| {
            evaluate(ctx, rng).map(|action| CarrierCandidate {
                evaluator: *name,
                action,
            })
        })
        .unwrap_or(CarrierCandidate {
            evaluator: "hold",
            action: CarrierAction::Hold,
        });

    debug!(
        "player {} with ball: {} -> {:?}",
        ctx.player.id, candidate.evaluator, candidate.action
    );

    candidate
}

fn evaluate_shot(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Option<CarrierAction> {
    let goal = ctx.opponent_goal();
    let distance = ctx.distance_to(&goal);

    if distance < CLOSE_SHOT_DISTANCE {
        if rng.random::<f32>() < 0.8 {
            return Some(CarrierAction::Kick(KickRequest::new(
                KickKind::CloseShot,
                goal,
                SHOOT_POWER * 1.2,
            )));
        }
    } else if distance < LONG_SHOT_DISTANCE && !ctx.is_pressed() {
        let aggression = match ctx.player.role {
            PlayerRole::Forward | PlayerRole::Midfielder => 0.15,
            _ => 0.05,
        };

        if rng.random::<f32>() < aggression {
            return Some(CarrierAction::Kick(KickRequest::new(
                KickKind::LongShot,
                goal,
                SHOOT_POWER,
            )));
        }
    }

    None
}

/// Far-post target for crosses from open play and corners.
pub fn cross_target(side: TeamSide, rng: &mut MatchRng) -> Vector2<f32> {
    let x = match side {
        TeamSide::Home => PITCH_WIDTH * 0.9,
        TeamSide::Away => PITCH_WIDTH * 0.1,
    };

    Vector2::new(x, PITCH_HEIGHT / 2.0 + rng.random_range(-40.0..40.0))
}

fn evaluate_cross(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Option<CarrierAction> {
    let position = ctx.player.position;
    let team = ctx.player.team;

    let near_wing = position.y < PITCH_HEIGHT * 0.2 || position.y > PITCH_HEIGHT * 0.8;
    let in_attacking_third = match team {
        TeamSide::Home => position.x > PITCH_WIDTH * 0.6,
        TeamSide::Away => position.x < PITCH_WIDTH * 0.4,
    };

    if !near_wing || !in_attacking_third {
        return None;
    }

    let forward_in_box = ctx.field.players.iter().any(|p| {
        p.team == team
            && p.role == PlayerRole::Forward
            && match team {
                TeamSide::Home => p.position.x > PITCH_WIDTH * 0.75,
                TeamSide::Away => p.position.x < PITCH_WIDTH * 0.25,
            }
    });

    if forward_in_box && rng.random::<f32>() < 0.4 {
        return Some(CarrierAction::Kick(KickRequest::new(
            KickKind::Cross,
            cross_target(team, rng),
            SHOOT_POWER * 0.7,
        )));
    }

    None
}

fn evaluate_pass(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Option<CarrierAction> {
    let best = PassEvaluator::best_target(ctx)?;

    if best.score <= MIN_PASS_SCORE || rng.random::<f32>() >= 0.9 {
        return None;
    }

    let power = if best.receiver.role.is_defensive_block() {
        PASS_POWER
    } else {
        PASS_POWER * 1.3
    };

    Some(CarrierAction::Kick(KickRequest::new(
        KickKind::Pass {
            receiver: best.receiver.role,
        },
        best.receiver.position,
        power,
    )))
}

fn evaluate_take_on(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Option<CarrierAction> {
    let (defender, distance) = ctx.nearest_opponent()?;
    let dribbling = ctx.player.skills.dribbling;

    if distance >= TAKE_ON_DISTANCE || rng.random::<f32>() >= dribbling * 0.9 {
        return None;
    }

    let skill_factor = dribbling * 1.5;
    let success_rate = skill_factor / (skill_factor + defender.skills.defensive_awareness);

    if rng.random::<f32>() < success_rate {
        let lateral = if rng.random_bool(0.5) { 30.0 } else { -30.0 };
        let evasion_angle = f32::atan2(lateral, ctx.direction() * 10.0);
        let step = Vector2::new(evasion_angle.cos(), evasion_angle.sin())
            * SPRINT_SPEED
            * 0.8
            * ctx.delta_time;

        return Some(CarrierAction::TakeOn(TakeOnResult::Beaten {
            defender_id: defender.id,
            position: ctx.player.position + step,
        }));
    }

    let towards_defender = defender.position - ctx.player.position;
    let heading = if towards_defender.norm() > f32::EPSILON {
        towards_defender.normalize()
    } else {
        Vector2::new(ctx.direction(), 0.0)
    };

    Some(CarrierAction::TakeOn(TakeOnResult::Lost {
        defender_id: defender.id,
        nudge: heading * DRIBBLE_NUDGE_SPEED,
    }))
}

fn evaluate_advance(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Option<CarrierAction> {
    let dribbling = ctx.player.skills.dribbling;

    if rng.random::<f32>() >= dribbling * 0.9 {
        return Some(CarrierAction::Hold);
    }

    let drift = Vector2::new(
        ctx.direction() * SPRINT_SPEED * dribbling * 0.5,
        rng.random_range(-1.0..1.0),
    );

    Some(CarrierAction::Move(ctx.player.position + drift * ctx.delta_time))
}
