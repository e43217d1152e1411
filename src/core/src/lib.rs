use std::sync::atomic::{AtomicBool, Ordering};

static COMMENTARY_LOGGING_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_commentary_logging(enabled: bool) {
    COMMENTARY_LOGGING_MODE.store(enabled, Ordering::SeqCst);
}

pub fn is_commentary_logging() -> bool {
    COMMENTARY_LOGGING_MODE.load(Ordering::SeqCst)
}

pub mod simulator;
pub use simulator::*;

pub mod betting;
pub mod config;
pub mod r#match;

pub use betting::{BetRejection, BetSlip, Settlement};
pub use config::SimulationConfig;

pub use r#match::{
    GameFlowState, MatchOutcome, MatchSnapshot, MatchState, PlayerRole, Score, TeamSide,
};

pub use nalgebra::Vector2;
