use crate::config::SimulationConfig;
use crate::r#match::{
    Commentary, MatchField, MatchRng, RestartFlow, RestartKind, RestartToken, Score, SetPiece,
};
use log::debug;
use rand::RngExt;

pub const FULL_TIME_MINUTE: u8 = 90;

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchTime {
    pub minute: u8,
}

impl MatchTime {
    pub fn new() -> Self {
        MatchTime::default()
    }

    /// Advances the clock by one minute with `probability`. True once full time is reached.
    pub fn tick(&mut self, rng: &mut MatchRng, probability: f32) -> bool {
        if !self.is_full_time() && rng.random::<f32>() < probability {
            self.minute += 1;
        }

        self.is_full_time()
    }

    pub fn is_full_time(&self) -> bool {
        self.minute >= FULL_TIME_MINUTE
    }
}

pub struct MatchContext {
    pub score: Score,
    pub time: MatchTime,
    pub flow: RestartFlow,
    pub commentary: Commentary,

    pending_restart: Option<RestartToken>,
    restart_delay: f32,
    minute_tick_probability: f32,
    reroll_skills_on_restart: bool,
}

impl MatchContext {
    pub fn new(config: &SimulationConfig) -> Self {
        MatchContext {
            score: Score::new(),
            time: MatchTime::new(),
            flow: RestartFlow::new(),
            commentary: Commentary::new(),
            pending_restart: None,
            restart_delay: config.restart_delay_frames,
            minute_tick_probability: config.minute_tick_probability,
            reroll_skills_on_restart: config.reroll_skills_on_restart,
        }
    }

    pub fn tick_clock(&mut self, rng: &mut MatchRng) -> bool {
        self.time.tick(rng, self.minute_tick_probability)
    }

    /// Re-forms both teams, puts the ball on the spot and arms the restart timer.
    pub fn schedule_restart(
        &mut self,
        field: &mut MatchField,
        kind: RestartKind,
        set_piece: SetPiece,
        rng: &mut MatchRng,
    ) {
        let reroll = if self.reroll_skills_on_restart {
            Some(rng)
        } else {
            None
        };

        field.reset_formation(reroll);
        field.ball.place(set_piece.position);

        self.pending_restart = Some(self.flow.schedule(kind, set_piece, self.restart_delay));
    }

    /// Drops the restart this context armed if it has not fired yet.
    pub fn cancel_restart(&mut self) -> bool {
        let Some(token) = self.pending_restart.take() else {
            return false;
        };

        let cancelled = self.flow.cancel(token);
        if cancelled {
            debug!("restart {:?} cancelled", token);
        }

        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_clock_stops_at_full_time() {
        let mut rng = MatchRng::seed_from_u64(1);
        let mut time = MatchTime { minute: 89 };

        assert!(time.tick(&mut rng, 1.0));
        assert!(time.tick(&mut rng, 1.0));
        assert_eq!(time.minute, FULL_TIME_MINUTE);
    }

    #[test]
    fn test_armed_restart_can_be_cancelled_once() {
        let mut rng = MatchRng::seed_from_u64(4);
        let mut field = MatchField::new(&mut rng);
        let mut context = MatchContext::new(&SimulationConfig::default());

        let throw_in = SetPiece::new(crate::r#match::TeamSide::Away, nalgebra::Vector2::new(400.0, 10.0));
        context.schedule_restart(&mut field, RestartKind::ThrowIn, throw_in, &mut rng);

        assert!(context.flow.is_pending());
        assert!(context.cancel_restart());
        assert!(!context.flow.is_pending());
        assert!(!context.cancel_restart());
        assert!(context.flow.advance(10.0).is_none());
    }

    #[test]
    fn test_clock_never_moves_with_zero_probability() {
        let mut rng = MatchRng::seed_from_u64(1);
        let mut time = MatchTime::new();

        for _ in 0..1000 {
            assert!(!time.tick(&mut rng, 0.0));
        }

        assert_eq!(time.minute, 0);
    }
}
