pub mod carrier;
pub mod constants;
pub mod goalkeeper;
pub mod off_ball;
pub mod passing;
pub mod processor;
pub mod set_piece;

pub use carrier::*;
pub use constants::*;
pub use goalkeeper::*;
pub use off_ball::*;
pub use passing::*;
pub use processor::*;
pub use set_piece::*;
