pub mod engine;
pub mod result;
pub mod snapshot;

pub use engine::*;
pub use result::*;
pub use snapshot::*;
