pub const PLAYER_SPEED: f32 = 2.0;
pub const SPRINT_SPEED: f32 = 3.2;

pub const PASS_POWER: f32 = 7.0;
pub const SHOOT_POWER: f32 = 12.0;

pub const INTERCEPT_RANGE: f32 = 20.0;
pub const PICKUP_DISTANCE: f32 = 15.0;

/// An opponent this close puts the player under pressure.
pub const PRESSURE_DISTANCE: f32 = 40.0;
/// A receiver with no opponent this close counts as unmarked.
pub const UNMARKED_DISTANCE: f32 = 50.0;
