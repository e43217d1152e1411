pub mod behaviours;
pub mod player;
pub mod skills;
pub mod strategies;

pub use behaviours::*;
pub use player::*;
pub use skills::*;
pub use strategies::*;
