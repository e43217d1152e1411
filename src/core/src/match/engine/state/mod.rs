pub mod flow;
pub mod manager;

pub use flow::*;
pub use manager::*;
