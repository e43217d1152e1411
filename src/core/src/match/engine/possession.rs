use crate::r#match::{
    DISPOSSESSED_STUN, FAILED_TACKLE_STUN, GOALKEEPER_HANDLING_DELAY, INTERCEPT_RANGE, MatchField,
    MatchRng, POSSESSION_LOCK, PICKUP_DISTANCE, PenaltyArea,
};
use log::debug;
use nalgebra::Vector2;
use rand::RngExt;

const BASE_STEAL_CHANCE: f32 = 0.05;
const TACKLE_ATTEMPT_MULTIPLIER: f32 = 3.0;
const MISSED_TACKLE_IMPULSE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionEvent {
    Picked { player_id: u32 },
    Tackled { winner: u32, loser: u32 },
    MissedTackle { player_id: u32 },
}

pub struct PossessionResolver;

impl PossessionResolver {
    /// Free pickups and tackling contests, in player id order.
    pub fn resolve(field: &mut MatchField, rng: &mut MatchRng) -> Vec<PossessionEvent> {
        let mut events = Vec::new();

        for index in 0..field.players.len() {
            let event = match field.ball.current_owner {
                None => Self::try_pickup(field, index),
                Some(owner_id) if owner_id as usize != index => {
                    Self::try_challenge(field, index, owner_id as usize, rng)
                }
                Some(_) => None,
            };

            if let Some(event) = event {
                debug!("possession: {:?}", event);
                events.push(event);
            }
        }

        events
    }

    fn try_pickup(field: &mut MatchField, index: usize) -> Option<PossessionEvent> {
        let player = &field.players[index];

        if player.cooldown > 0 || player.distance_to(&field.ball.position) >= PICKUP_DISTANCE {
            return None;
        }

        field.ball.claim(player);

        let player = &mut field.players[index];
        if player.role.is_goalkeeper() {
            player.handling_delay = GOALKEEPER_HANDLING_DELAY;
        }

        Some(PossessionEvent::Picked {
            player_id: player.id,
        })
    }

    fn try_challenge(
        field: &mut MatchField,
        challenger_index: usize,
        owner_index: usize,
        rng: &mut MatchRng,
    ) -> Option<PossessionEvent> {
        let challenger = field.players.get(challenger_index)?;
        let owner = field.players.get(owner_index)?;

        if challenger.team == owner.team {
            return None;
        }

        // Keepers cannot be robbed inside their own area
        if owner.role.is_goalkeeper()
            && PenaltyArea::defended_by(owner.team).contains(&owner.position)
        {
            return None;
        }

        if owner.is_stunned() || challenger.is_stunned() {
            return None;
        }

        let awareness = challenger.skills.defensive_awareness;
        let effective_range = INTERCEPT_RANGE + awareness * 5.0;
        let distance = challenger.distance_to(&field.ball.position);

        let steal_chance = Self::steal_chance(
            awareness,
            challenger.role.is_defensive_block(),
            owner.skills.dribbling,
            challenger.tackle_attempt,
        );

        if distance < effective_range && rng.random::<f32>() < steal_chance {
            let winner = challenger.id;
            let loser = owner.id;

            field.ball.claim(&field.players[challenger_index]);
            field.players[challenger_index].cooldown = POSSESSION_LOCK;
            field.players[owner_index].cooldown = DISPOSSESSED_STUN;

            return Some(PossessionEvent::Tackled { winner, loser });
        }

        if challenger.tackle_attempt {
            let away_from_owner = challenger.position - owner.position;
            let push = if away_from_owner.norm() > f32::EPSILON {
                away_from_owner.normalize()
            } else {
                Vector2::new(-challenger.team.attack_direction(), 0.0)
            };

            let challenger = &mut field.players[challenger_index];
            challenger.cooldown = FAILED_TACKLE_STUN;
            challenger.tackle_attempt = false;
            challenger.position += push * MISSED_TACKLE_IMPULSE;

            return Some(PossessionEvent::MissedTackle {
                player_id: challenger.id,
            });
        }

        None
    }

    pub fn steal_chance(
        awareness: f32,
        defensive_block: bool,
        carrier_dribbling: f32,
        tackle_attempt: bool,
    ) -> f32 {
        let tackle_advantage = awareness * if defensive_block { 1.5 } else { 1.0 };
        let chance = BASE_STEAL_CHANCE * tackle_advantage * (1.0 - carrier_dribbling / 2.0);

        if tackle_attempt {
            (chance * TACKLE_ATTEMPT_MULTIPLIER).min(1.0)
        } else {
            chance.min(1.0)
        }
    }
}
