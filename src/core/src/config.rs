/// Frames are counted in 60 Hz units: `update(1.0)` is one rendered frame.
pub const FRAMES_PER_SECOND: f32 = 60.0;

pub const DEFAULT_STARTING_BALANCE: u64 = 1000;

// ~100 ms
const RESTART_DELAY_FRAMES: f32 = 6.0;
// ~4 s
const RETURN_TO_BETTING_FRAMES: f32 = 4.0 * FRAMES_PER_SECOND;

/// Tunables for one simulator instance.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub starting_balance: u64,
    /// Delay between a goal/out-of-bounds event and the restart taker receiving the ball.
    pub restart_delay_frames: f32,
    /// How long the full-time result stays on screen before betting reopens.
    pub return_to_betting_frames: f32,
    /// Chance per tick that the simulated clock advances by one minute.
    pub minute_tick_probability: f32,
    pub seed: Option<u64>,
    /// Re-randomize every player's skills on each restart instead of only at kick off.
    pub reroll_skills_on_restart: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            starting_balance: DEFAULT_STARTING_BALANCE,
            restart_delay_frames: RESTART_DELAY_FRAMES,
            return_to_betting_frames: RETURN_TO_BETTING_FRAMES,
            minute_tick_probability: 0.05,
            seed: None,
            reroll_skills_on_restart: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    pub fn with_skill_reroll(mut self, enabled: bool) -> Self {
        self.reroll_skills_on_restart = enabled;
        self
    }
}
