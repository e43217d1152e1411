use crate::r#match::ball::events::BallEvent;
use crate::r#match::{MatchPlayer, PITCH_HEIGHT, PITCH_WIDTH, PLAYER_MARGIN, TeamSide, is_within_goal_mouth};
use log::debug;
use nalgebra::Vector2;

pub const BALL_FRICTION: f32 = 0.96;
pub const BALL_EDGE_MARGIN: f32 = 5.0;

/// How far in front of an outfield carrier the ball sits.
pub const DRIBBLE_OFFSET: f32 = 6.0;

const THROW_IN_MIN_SPEED: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub current_owner: Option<u32>,
    pub last_touch: Option<TeamSide>,
}

impl Ball {
    pub fn with_coord(field_width: f32, field_height: f32) -> Self {
        Ball {
            position: Vector2::new(field_width / 2.0, field_height / 2.0),
            velocity: Vector2::zeros(),
            current_owner: None,
            last_touch: None,
        }
    }

    pub fn is_owned(&self) -> bool {
        self.current_owner.is_some()
    }

    pub fn claim(&mut self, player: &MatchPlayer) {
        self.current_owner = Some(player.id);
        self.last_touch = Some(player.team);
        self.pin_to(player);
    }

    pub fn release(&mut self, velocity: Vector2<f32>, team: TeamSide) {
        self.current_owner = None;
        self.velocity = velocity;
        self.last_touch = Some(team);
    }

    /// Dead ball at a restart spot.
    pub fn place(&mut self, position: Vector2<f32>) {
        self.position = position;
        self.velocity = Vector2::zeros();
        self.current_owner = None;
        self.last_touch = None;
    }

    pub fn pin_to(&mut self, owner: &MatchPlayer) {
        let offset = if owner.role.is_goalkeeper() {
            0.0
        } else {
            DRIBBLE_OFFSET * owner.team.attack_direction()
        };

        self.position = owner.position + Vector2::new(offset, 0.0);
        self.velocity = Vector2::zeros();
    }

    /// Integrates a free ball and resolves touchline contact.
    pub fn update(&mut self, delta_time: f32) -> Option<BallEvent> {
        if self.is_owned() {
            return None;
        }

        self.position += self.velocity * delta_time;
        self.velocity *= BALL_FRICTION.powf(delta_time);

        self.check_touchline()
    }

    fn check_touchline(&mut self) -> Option<BallEvent> {
        let out_top = self.position.y < BALL_EDGE_MARGIN;
        let out_bottom = self.position.y > PITCH_HEIGHT - BALL_EDGE_MARGIN;

        if !out_top && !out_bottom {
            return None;
        }

        if self.velocity.x.abs() > THROW_IN_MIN_SPEED || self.velocity.y.abs() > THROW_IN_MIN_SPEED {
            let receiving = match (out_top, self.velocity.x) {
                (true, vx) if vx > 0.0 => TeamSide::Away,
                (true, _) => TeamSide::Home,
                (false, vx) if vx < 0.0 => TeamSide::Away,
                (false, _) => TeamSide::Home,
            };

            let y = if out_top {
                PLAYER_MARGIN
            } else {
                PITCH_HEIGHT - PLAYER_MARGIN
            };

            let x = self.position.x.clamp(PLAYER_MARGIN, PITCH_WIDTH - PLAYER_MARGIN);

            return Some(BallEvent::OutOfTouchline {
                receiving,
                position: Vector2::new(x, y),
            });
        }

        // Rolling too slowly to go out: bounce back in
        self.velocity.y = -self.velocity.y;
        self.position.y = self
            .position
            .y
            .clamp(BALL_EDGE_MARGIN, PITCH_HEIGHT - BALL_EDGE_MARGIN);

        debug!("ball bounced off the touchline at x = {:.1}", self.position.x);

        None
    }

    /// Goals and corners once the ball crosses either goal line.
    pub fn check_goal_line(&self) -> Option<BallEvent> {
        let (exit_end_attacker, flag_x) = if self.position.x > PITCH_WIDTH {
            (TeamSide::Home, PITCH_WIDTH - PLAYER_MARGIN)
        } else if self.position.x < 0.0 {
            (TeamSide::Away, PLAYER_MARGIN)
        } else {
            return None;
        };

        if is_within_goal_mouth(self.position.y) {
            return Some(BallEvent::Goal {
                scorer: exit_end_attacker,
            });
        }

        // Without a recorded touch the attacking side is assumed to have put it out
        let out_by = self.last_touch.unwrap_or(exit_end_attacker);

        let flag_y = if self.position.y < PITCH_HEIGHT / 2.0 {
            PLAYER_MARGIN
        } else {
            PITCH_HEIGHT - PLAYER_MARGIN
        };

        Some(BallEvent::OverGoalLine {
            corner_team: out_by.opponent(),
            position: Vector2::new(flag_x, flag_y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::{PlayerSkills, formation_slots};

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut ball = Ball::with_coord(PITCH_WIDTH, PITCH_HEIGHT);
        ball.position = Vector2::new(x, y);
        ball.velocity = Vector2::new(vx, vy);
        ball
    }

    #[test]
    fn test_free_ball_moves_and_slows() {
        let mut ball = ball_at(400.0, 250.0, 10.0, 0.0);

        assert!(ball.update(1.0).is_none());

        assert_eq!(ball.position, Vector2::new(410.0, 250.0));
        assert!((ball.velocity.x - 9.6).abs() < 1e-4);
    }

    #[test]
    fn test_top_exit_moving_right_is_away_throw_in() {
        let mut ball = ball_at(400.0, 6.0, 2.0, -3.0);

        let event = ball.update(1.0);

        assert_eq!(
            event,
            Some(BallEvent::OutOfTouchline {
                receiving: TeamSide::Away,
                position: Vector2::new(402.0, 10.0),
            })
        );
    }

    #[test]
    fn test_bottom_exit_moving_left_is_away_throw_in() {
        let mut ball = ball_at(300.0, 494.0, -2.0, 3.0);

        match ball.update(1.0) {
            Some(BallEvent::OutOfTouchline { receiving, position }) => {
                assert_eq!(receiving, TeamSide::Away);
                assert_eq!(position.y, PITCH_HEIGHT - PLAYER_MARGIN);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_slow_ball_bounces_back() {
        let mut ball = ball_at(300.0, 5.2, 0.1, -0.4);

        assert!(ball.update(1.0).is_none());
        assert!(ball.velocity.y > 0.0);
        assert!(ball.position.y >= BALL_EDGE_MARGIN);
    }

    #[test]
    fn test_goal_and_corner_detection() {
        let goal = ball_at(801.0, 250.0, 5.0, 0.0);
        assert_eq!(
            goal.check_goal_line(),
            Some(BallEvent::Goal {
                scorer: TeamSide::Home
            })
        );

        let mut wide = ball_at(-1.0, 60.0, -5.0, 0.0);
        wide.last_touch = Some(TeamSide::Away);
        assert_eq!(
            wide.check_goal_line(),
            Some(BallEvent::OverGoalLine {
                corner_team: TeamSide::Home,
                position: Vector2::new(PLAYER_MARGIN, PLAYER_MARGIN),
            })
        );

        assert!(ball_at(400.0, 250.0, 0.0, 0.0).check_goal_line().is_none());
    }

    #[test]
    fn test_pinned_ball_sits_in_front_of_outfield_carrier() {
        let slot = formation_slots(TeamSide::Away)
            .find(|s| !s.role.is_goalkeeper())
            .unwrap();
        let player = MatchPlayer::from_slot(&slot, PlayerSkills::new(0.5, 0.5, 0.5));

        let mut ball = ball_at(0.0, 0.0, 3.0, 3.0);
        ball.claim(&player);

        assert_eq!(ball.current_owner, Some(player.id));
        assert_eq!(ball.position.x, player.position.x - DRIBBLE_OFFSET);
        assert_eq!(ball.velocity, Vector2::zeros());
    }
}
