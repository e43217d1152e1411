use crate::betting::{BetRejection, BetSlip, Settlement};
use crate::config::SimulationConfig;
use crate::r#match::{
    FootballEngine, GameFlowState, MatchOutcome, MatchRng, MatchSnapshot, MatchState, Score,
    StateManager, TickOutcome,
};
use log::{debug, info};
use rand::SeedableRng;

/// Betting round wrapped around a match: `Betting -> Playing -> Finished -> Betting`.
pub struct FootballSimulator {
    config: SimulationConfig,
    state_manager: StateManager,
    slip: BetSlip,
    engine: FootballEngine,
    return_timer: f32,
    frame: u64,
    last_settlement: Option<Settlement>,
}

impl Default for FootballSimulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl FootballSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => MatchRng::seed_from_u64(seed),
            None => MatchRng::seed_from_u64(rand::random()),
        };

        let mut engine = FootballEngine::new(&config, rng);
        engine.context.commentary.say("Place your bets!");

        FootballSimulator {
            slip: BetSlip::new(config.starting_balance),
            config,
            state_manager: StateManager::new(),
            engine,
            return_timer: 0.0,
            frame: 0,
            last_settlement: None,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state_manager.current()
    }

    pub fn balance(&self) -> u64 {
        self.slip.balance()
    }

    pub fn score(&self) -> Score {
        self.engine.context.score
    }

    pub fn minute(&self) -> u8 {
        self.engine.context.time.minute
    }

    pub fn flow(&self) -> GameFlowState {
        self.engine.context.flow.state()
    }

    pub fn slip(&self) -> &BetSlip {
        &self.slip
    }

    pub fn last_settlement(&self) -> Option<Settlement> {
        self.last_settlement
    }

    pub fn commentary(&self) -> impl Iterator<Item = &str> {
        self.engine.context.commentary.history()
    }

    fn ensure_betting(&self) -> Result<(), BetRejection> {
        if self.state_manager.is(MatchState::Betting) {
            Ok(())
        } else {
            Err(BetRejection::NotAcceptingBets)
        }
    }

    pub fn select_outcome(&mut self, outcome: MatchOutcome) -> Result<(), BetRejection> {
        self.ensure_betting()?;
        self.slip.select(outcome);

        Ok(())
    }

    pub fn adjust_stake(&mut self, delta: i64) -> Result<u64, BetRejection> {
        self.ensure_betting()?;
        self.slip.adjust_stake(delta)
    }

    /// Takes the stake and kicks off a fresh match.
    pub fn start_match(&mut self) -> Result<u64, BetRejection> {
        self.ensure_betting()?;

        let stake = self.slip.place()?;

        self.engine.reset(&self.config);
        self.engine.kick_off();
        self.last_settlement = None;
        self.state_manager.next();

        info!(
            "match started: {} on {:?}, balance {}",
            stake,
            self.slip.selection(),
            self.slip.balance()
        );

        Ok(stake)
    }

    /// Advances one frame; `delta_time` is in 60 Hz frame units.
    pub fn update(&mut self, delta_time: f32) {
        if delta_time.is_nan() || delta_time <= 0.0 {
            return;
        }

        self.frame += 1;

        match self.state_manager.current() {
            MatchState::Betting => {}
            MatchState::Playing => {
                if self.engine.game_tick(delta_time) == TickOutcome::FullTime {
                    self.finish_match();
                }
            }
            MatchState::Finished => {
                self.return_timer -= delta_time;

                if self.return_timer <= 0.0 {
                    self.slip.clear();
                    self.state_manager.next();
                    self.engine.context.commentary.say("Place your bets!");

                    debug!("betting reopened, balance {}", self.slip.balance());
                }
            }
        }
    }

    fn finish_match(&mut self) {
        let outcome = self.engine.context.score.outcome();
        let settlement = self.slip.settle(outcome);

        self.engine
            .context
            .commentary
            .say(format!("Full Time! Result: {}", outcome));

        info!(
            "full time {}-{}: {} (bet {}, credited {}, balance {})",
            self.engine.context.score.home,
            self.engine.context.score.away,
            outcome,
            if settlement.won { "won" } else { "lost" },
            settlement.credited,
            self.slip.balance()
        );

        self.last_settlement = Some(settlement);
        self.return_timer = self.config.return_to_betting_frames;
        self.state_manager.next();
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self.frame, self.state(), &self.engine, &self.slip)
    }
}
