pub mod ball;
pub mod commentary;
pub mod context;
pub mod engine;
pub mod field;
pub mod player;
pub mod possession;
pub mod state;
pub mod tactics;

pub use ball::*;
pub use commentary::*;
pub use context::*;
pub use engine::*;
pub use field::*;
pub use player::*;
pub use possession::*;
pub use state::*;
pub use tactics::*;

/// Random source threaded through every probabilistic decision of a match.
pub type MatchRng = rand::rngs::StdRng;
