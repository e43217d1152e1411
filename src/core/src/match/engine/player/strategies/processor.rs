use crate::r#match::{
    Ball, MatchContext, MatchField, MatchPlayer, PRESSURE_DISTANCE, TeamSide, goal_centre,
};
use nalgebra::Vector2;

/// Whether any opponent of `player` stands within `radius` of `point`.
pub fn opponent_within(field: &MatchField, team: TeamSide, point: &Vector2<f32>, radius: f32) -> bool {
    field
        .players
        .iter()
        .any(|p| p.team != team && p.distance_to(point) < radius)
}

/// Read-only view one player decides from.
pub struct StateProcessingContext<'p> {
    pub player: &'p MatchPlayer,
    pub field: &'p MatchField,
    pub context: &'p MatchContext,
    pub delta_time: f32,
}

impl<'p> StateProcessingContext<'p> {
    pub fn new(
        player: &'p MatchPlayer,
        field: &'p MatchField,
        context: &'p MatchContext,
        delta_time: f32,
    ) -> Self {
        StateProcessingContext {
            player,
            field,
            context,
            delta_time,
        }
    }

    pub fn ball(&self) -> &'p Ball {
        &self.field.ball
    }

    pub fn ball_owner(&self) -> Option<&'p MatchPlayer> {
        self.field.owner()
    }

    pub fn has_ball(&self) -> bool {
        self.field.ball.current_owner == Some(self.player.id)
    }

    pub fn direction(&self) -> f32 {
        self.player.team.attack_direction()
    }

    pub fn opponent_goal(&self) -> Vector2<f32> {
        goal_centre(self.player.team)
    }

    pub fn teammates(&self) -> impl Iterator<Item = &'p MatchPlayer> + 'p {
        let (id, team) = (self.player.id, self.player.team);

        self.field
            .players
            .iter()
            .filter(move |p| p.team == team && p.id != id)
    }

    pub fn opponents(&self) -> impl Iterator<Item = &'p MatchPlayer> + 'p {
        let team = self.player.team;

        self.field.players.iter().filter(move |p| p.team != team)
    }

    pub fn is_pressed(&self) -> bool {
        self.is_marked(self.player, PRESSURE_DISTANCE)
    }

    pub fn is_marked(&self, player: &MatchPlayer, radius: f32) -> bool {
        opponent_within(self.field, player.team, &player.position, radius)
    }

    pub fn nearest_opponent(&self) -> Option<(&'p MatchPlayer, f32)> {
        self.opponents()
            .map(|p| (p, p.distance_to(&self.player.position)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    pub fn distance_to(&self, point: &Vector2<f32>) -> f32 {
        self.player.distance_to(point)
    }

    /// Distance gained towards the opponent goal by moving from `from` to `to`.
    pub fn forward_progress(&self, from: &Vector2<f32>, to: &Vector2<f32>) -> f32 {
        (to.x - from.x) * self.direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::r#match::MatchRng;
    use rand::SeedableRng;

    #[test]
    fn test_teammates_and_opponents_partition_the_roster() {
        let mut rng = MatchRng::seed_from_u64(1);
        let field = MatchField::new(&mut rng);
        let context = MatchContext::new(&SimulationConfig::default());

        let ctx = StateProcessingContext::new(&field.players[3], &field, &context, 1.0);

        assert_eq!(ctx.teammates().count(), 10);
        assert_eq!(ctx.opponents().count(), 11);
        assert!(ctx.teammates().all(|p| p.team == TeamSide::Home && p.id != 3));
        assert_eq!(ctx.opponent_goal(), Vector2::new(800.0, 250.0));
    }

    #[test]
    fn test_pressure_detection() {
        let mut rng = MatchRng::seed_from_u64(1);
        let mut field = MatchField::new(&mut rng);
        let context = MatchContext::new(&SimulationConfig::default());

        field.players[14].position = field.players[9].position + Vector2::new(20.0, 0.0);

        let ctx = StateProcessingContext::new(&field.players[9], &field, &context, 1.0);

        assert!(ctx.is_pressed());
        let (nearest, distance) = ctx.nearest_opponent().unwrap();
        assert_eq!(nearest.id, 14);
        assert!((distance - 20.0).abs() < 1e-4);
    }
}
