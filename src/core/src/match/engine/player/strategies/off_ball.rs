use crate::r#match::{
    MatchPlayer, MatchRng, PITCH_HEIGHT, PITCH_WIDTH, PLAYER_SPEED, PlayerRole, SPRINT_SPEED,
    StateProcessingContext, SteeringBehavior, clamp_to_pitch,
};
use nalgebra::Vector2;
use rand::RngExt;

const TACKLE_DISTANCE: f32 = 30.0;
const CLOSE_DOWN_DISTANCE: f32 = 100.0;
const LOOSE_BALL_CHASE_DISTANCE: f32 = 100.0;
const SUPPORT_DISTANCE: f32 = 150.0;
const KEEPER_TRACKING_RANGE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffBallDecision {
    pub position: Vector2<f32>,
    /// Set when the player commits to a tackle this tick.
    pub tackle_attempt: bool,
}

struct Intent {
    target: Vector2<f32>,
    speed: f32,
    tackle_attempt: bool,
}

pub fn decide_without_ball(ctx: &StateProcessingContext, rng: &mut MatchRng) -> OffBallDecision {
    let me = ctx.player;
    let intent = movement_intent(ctx, rng);

    // Stunned players crawl whatever they intended
    let speed = if me.is_stunned() {
        PLAYER_SPEED * 0.1
    } else {
        intent.speed
    };

    let arrive = SteeringBehavior::Arrive {
        target: intent.target,
        speed,
    }
    .calculate(me.position, ctx.delta_time);

    let moved = me.position + arrive.displacement;

    let neighbours: Vec<Vector2<f32>> = ctx
        .field
        .players
        .iter()
        .filter(|p| p.id != me.id)
        .map(|p| p.position)
        .collect();

    let separation = SteeringBehavior::Separation {
        neighbours: &neighbours,
        fallback: Vector2::new(ctx.direction(), 0.0),
    }
    .calculate(moved, ctx.delta_time);

    OffBallDecision {
        position: clamp_to_pitch(moved + separation.displacement),
        tackle_attempt: intent.tackle_attempt,
    }
}

fn movement_intent(ctx: &StateProcessingContext, rng: &mut MatchRng) -> Intent {
    let me = ctx.player;
    let direction = ctx.direction();
    let owner = ctx.ball_owner();

    let own_possession = owner.is_some_and(|o| o.team == me.team);
    let enemy_possession = owner.is_some_and(|o| o.team != me.team);

    // Tempo: a winning side slows down in its own half
    let base_speed = if ctx.context.score.is_leading(me.team) && me.is_in_own_half() {
        PLAYER_SPEED * 0.6
    } else {
        PLAYER_SPEED
    };

    let advance = match (owner, own_possession, enemy_possession) {
        (Some(owner), true, _) => {
            let lead = ((owner.position.x - me.position.x) * direction).max(0.0);

            match me.role {
                PlayerRole::Forward => 150.0 + lead * 0.5,
                PlayerRole::Midfielder => 80.0 + lead * 0.3,
                PlayerRole::Defender => 30.0,
                PlayerRole::Goalkeeper => 0.0,
            }
        }
        (_, _, true) => match me.role {
            PlayerRole::Defender => -50.0,
            PlayerRole::Midfielder => -20.0,
            _ => 0.0,
        },
        _ => 0.0,
    };

    let width_offset = (me.start_position.y - PITCH_HEIGHT / 2.0) / 5.0;
    let width = if own_possession {
        width_offset
    } else if enemy_possession {
        -width_offset
    } else {
        0.0
    };

    let mut intent = Intent {
        target: Vector2::new(
            me.start_position.x + direction * advance,
            me.start_position.y + width,
        ),
        speed: base_speed,
        tackle_attempt: false,
    };

    if me.role.is_goalkeeper() {
        let centre = PITCH_HEIGHT / 2.0;
        intent.target = Vector2::new(
            me.start_position.x,
            ctx.ball().position.y.clamp(
                centre - KEEPER_TRACKING_RANGE,
                centre + KEEPER_TRACKING_RANGE,
            ),
        );

        return intent;
    }

    match owner {
        Some(owner) if own_possession => attacking_run(ctx, owner, advance, &mut intent, rng),
        Some(owner) if enemy_possession => defend(ctx, owner, &mut intent),
        _ => {
            if ctx.distance_to(&ctx.ball().position) < LOOSE_BALL_CHASE_DISTANCE {
                intent.target = ctx.ball().position;
                intent.speed = SPRINT_SPEED * 1.2;
            }
        }
    }

    intent
}

fn attacking_run(
    ctx: &StateProcessingContext,
    owner: &MatchPlayer,
    advance: f32,
    intent: &mut Intent,
    rng: &mut MatchRng,
) {
    let me = ctx.player;
    let direction = ctx.direction();
    let centre = PITCH_HEIGHT / 2.0;
    let lane = me.start_position.y - centre;

    // Wide forwards stretch the back line, the central one holds the middle
    if me.role == PlayerRole::Forward && !me.is_in_own_half() && lane.abs() > f32::EPSILON {
        intent.target.y += lane.signum() * 30.0;
    }

    if !matches!(me.role, PlayerRole::Midfielder | PlayerRole::Forward) {
        return;
    }

    let distance_to_owner = ctx.distance_to(&owner.position);
    let ahead_of_owner = (me.position.x - owner.position.x) * direction > 0.0;

    if ctx.is_pressed() && distance_to_owner < SUPPORT_DISTANCE {
        // peel off the marker
        let towards_centre = if me.start_position.y > centre { -60.0 } else { 60.0 };

        intent.target = Vector2::new(
            me.start_position.x + direction * (advance + 30.0),
            me.position.y + towards_centre,
        );
        intent.speed = SPRINT_SPEED * 1.5;
    } else if distance_to_owner < 50.0 && ahead_of_owner {
        let target_x = owner.position.x + direction * 100.0 + rng.random_range(-10.0..10.0);

        let target_y = if (me.start_position.y - centre).abs() < 50.0 {
            me.position.y + if me.start_position.y > centre { 50.0 } else { -50.0 }
        } else {
            me.start_position.y + rng.random_range(-10.0..10.0)
        };

        intent.target = Vector2::new(target_x, target_y);
        intent.speed = SPRINT_SPEED;
    }
}

fn defend(ctx: &StateProcessingContext, owner: &MatchPlayer, intent: &mut Intent) {
    let me = ctx.player;

    if me.is_stunned() {
        intent.target = me.start_position;
        return;
    }

    let halfway = PITCH_WIDTH / 2.0;
    let direction = ctx.direction();

    if owner.role.is_goalkeeper() {
        // Fall back behind halfway while the keeper holds it
        let holding_line = halfway - direction * 50.0;
        if (intent.target.x - holding_line) * direction > 0.0 {
            intent.target.x = holding_line;
        }
        intent.target.y = me.start_position.y;
        intent.speed = PLAYER_SPEED;
        return;
    }

    let distance_to_owner = ctx.distance_to(&owner.position);

    if me.role.is_defensive_block() && distance_to_owner < CLOSE_DOWN_DISTANCE {
        intent.target = owner.position;

        if distance_to_owner < TACKLE_DISTANCE {
            intent.speed = SPRINT_SPEED * 3.0;
            intent.tackle_attempt = true;
        } else {
            intent.speed = SPRINT_SPEED * 1.5;
        }

        return;
    }

    let nearest_chaser = ctx
        .field
        .players
        .iter()
        .filter(|p| p.team == me.team && !p.role.is_goalkeeper())
        .min_by(|a, b| {
            a.distance_to(&owner.position)
                .total_cmp(&b.distance_to(&owner.position))
        })
        .map(|p| p.id);

    if nearest_chaser == Some(me.id) {
        // press from behind the carrier
        intent.target = Vector2::new(
            owner.position.x - owner.team.attack_direction() * 10.0,
            owner.position.y,
        );
        intent.speed = SPRINT_SPEED * 1.2;
    } else if me.role.is_defensive_block() {
        let block = (me.start_position + owner.position) / 2.0;

        intent.target = (intent.target + block * 2.0) / 3.0;
        intent.speed = PLAYER_SPEED * 0.8;
    }
}
