use crate::r#match::{
    MatchPlayer, MatchRng, PASS_POWER, PlayerRole, StateProcessingContext, UNMARKED_DISTANCE,
};
use itertools::Itertools;
use nalgebra::Vector2;
use rand::RngExt;

/// Opponents closer than this to the pass line can cut it out.
pub const LANE_CLEARANCE: f32 = 40.0;
const LANE_BOX_MARGIN: f32 = 20.0;

const MAX_KICK_DISTANCE: f32 = 500.0;

/// A lane is unsafe when an opponent is both near the line and inside its
/// bounding box grown by a margin.
pub fn is_lane_safe<'a>(
    from: &Vector2<f32>,
    to: &Vector2<f32>,
    opponents: impl IntoIterator<Item = &'a MatchPlayer>,
) -> bool {
    let lane = to - from;
    let length = lane.norm();

    let min = from.inf(to) - Vector2::repeat(LANE_BOX_MARGIN);
    let max = from.sup(to) + Vector2::repeat(LANE_BOX_MARGIN);

    !opponents.into_iter().any(|enemy| {
        let offset = enemy.position - from;

        let distance_to_line = if length > f32::EPSILON {
            (lane.x * offset.y - lane.y * offset.x).abs() / length
        } else {
            offset.norm()
        };

        let in_box = enemy.position.x > min.x
            && enemy.position.x < max.x
            && enemy.position.y > min.y
            && enemy.position.y < max.y;

        distance_to_line < LANE_CLEARANCE && in_box
    })
}

#[derive(Debug, Clone, Copy)]
pub struct PassCandidate<'p> {
    pub receiver: &'p MatchPlayer,
    pub score: f32,
}

pub struct PassEvaluator;

impl PassEvaluator {
    /// Lane-safe teammates, best first.
    pub fn rank_targets<'p>(ctx: &StateProcessingContext<'p>) -> Vec<PassCandidate<'p>> {
        let pressed = ctx.is_pressed();

        ctx.teammates()
            .filter(|teammate| {
                is_lane_safe(&ctx.player.position, &teammate.position, ctx.opponents())
            })
            .map(|receiver| PassCandidate {
                receiver,
                score: Self::score(ctx, receiver, pressed),
            })
            .sorted_by(|a, b| b.score.total_cmp(&a.score))
            .collect()
    }

    pub fn best_target<'p>(ctx: &StateProcessingContext<'p>) -> Option<PassCandidate<'p>> {
        Self::rank_targets(ctx).into_iter().next()
    }

    fn score(ctx: &StateProcessingContext, receiver: &MatchPlayer, pressed: bool) -> f32 {
        let progress = ctx.forward_progress(&ctx.player.position, &receiver.position);
        let distance = ctx.distance_to(&receiver.position);

        let mut score = progress * 3.0;

        if !ctx.is_marked(receiver, UNMARKED_DISTANCE) {
            score += 200.0;
        }

        // Medium and long balls break lines
        if distance > 100.0 && distance < 400.0 {
            score += distance * 0.5;
        } else if distance >= 400.0 {
            score += 150.0;
        }

        if receiver.role == PlayerRole::Forward {
            score += 100.0;
        }

        if progress < 0.0 && !pressed {
            score -= 50.0;
        }

        score
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KickKind {
    Pass { receiver: PlayerRole },
    CloseShot,
    LongShot,
    Cross,
    KeeperDistribution { receiver: PlayerRole },
    KeeperLaunch,
    ThrowIn { receiver: Option<PlayerRole> },
    CornerCross,
    KickoffLayOff,
}

impl KickKind {
    pub fn commentary(&self, kicker: &MatchPlayer) -> String {
        let team = kicker.team;

        match self {
            KickKind::Pass { receiver } => {
                format!("{} makes an intelligent pass to {}.", team, receiver)
            }
            KickKind::CloseShot => format!("{} Player {} takes a close-range shot!", team, kicker.id),
            KickKind::LongShot => format!("{} Player {} attempts a long shot!", team, kicker.id),
            KickKind::Cross => format!("{} sends a cross into the box!", team),
            KickKind::KeeperDistribution { receiver } => {
                format!("{} GK passes the ball to {}.", team, receiver)
            }
            KickKind::KeeperLaunch => format!("{} GK launches the ball forward.", team),
            KickKind::ThrowIn {
                receiver: Some(receiver),
            } => format!("{} throw-in to {}.", team, receiver),
            KickKind::ThrowIn { receiver: None } => format!("{} throw-in long.", team),
            KickKind::CornerCross => format!("{} crosses from the corner!", team),
            KickKind::KickoffLayOff => format!("{} starts the play.", team),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickRequest {
    pub kind: KickKind,
    pub target: Vector2<f32>,
    pub power: f32,
}

impl KickRequest {
    pub fn new(kind: KickKind, target: Vector2<f32>, power: f32) -> Self {
        KickRequest {
            kind,
            target,
            power,
        }
    }
}

/// Launch velocity for a kick, with aim error growing with power, distance
/// and pressure and shrinking with the kicker's passing.
pub fn kick_velocity(
    kicker: &MatchPlayer,
    request: &KickRequest,
    pressured: bool,
    rng: &mut MatchRng,
) -> Vector2<f32> {
    let distance = kicker.distance_to(&request.target);

    let mut error = 50.0 * (request.power / PASS_POWER) + distance * 0.2;
    if pressured {
        error *= 2.0;
    }
    error *= 1.0 - kicker.skills.passing * 0.5;

    let aim = request.target
        + Vector2::new(
            (rng.random::<f32>() - 0.5) * error,
            (rng.random::<f32>() - 0.5) * error,
        );

    let heading = aim - kicker.position;
    let direction = if heading.norm() > f32::EPSILON {
        heading.normalize()
    } else {
        Vector2::new(kicker.team.attack_direction(), 0.0)
    };

    let normalized_distance = distance.min(MAX_KICK_DISTANCE) / MAX_KICK_DISTANCE;
    let speed = request.power * (0.5 + normalized_distance * 0.7);

    direction * speed
}
