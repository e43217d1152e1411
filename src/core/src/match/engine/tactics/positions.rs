use crate::r#match::{PITCH_HEIGHT, PITCH_WIDTH, PlayerRole, TeamSide};
use nalgebra::Vector2;

pub const PLAYERS_PER_TEAM: usize = 11;

/// 4-3-3 for the home side, attacking left to right. The away side mirrors it.
const FORMATION_4_3_3: [(PlayerRole, f32, f32); PLAYERS_PER_TEAM] = [
    (PlayerRole::Goalkeeper, 40.0, PITCH_HEIGHT / 2.0),
    (PlayerRole::Defender, 150.0, 100.0),
    (PlayerRole::Defender, 150.0, 200.0),
    (PlayerRole::Defender, 150.0, 300.0),
    (PlayerRole::Defender, 150.0, 400.0),
    (PlayerRole::Midfielder, 350.0, 150.0),
    (PlayerRole::Midfielder, 350.0, PITCH_HEIGHT / 2.0),
    (PlayerRole::Midfielder, 350.0, 350.0),
    (PlayerRole::Forward, 550.0, 150.0),
    (PlayerRole::Forward, 550.0, PITCH_HEIGHT / 2.0),
    (PlayerRole::Forward, 550.0, 350.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub id: u32,
    pub side: TeamSide,
    pub role: PlayerRole,
    pub position: Vector2<f32>,
}

/// Slots for one team. Home ids are 0..11, away ids 11..22.
pub fn formation_slots(side: TeamSide) -> impl Iterator<Item = FormationSlot> {
    let id_offset = match side {
        TeamSide::Home => 0,
        TeamSide::Away => PLAYERS_PER_TEAM as u32,
    };

    FORMATION_4_3_3
        .iter()
        .enumerate()
        .map(move |(index, (role, x, y))| {
            let x = match side {
                TeamSide::Home => *x,
                TeamSide::Away => PITCH_WIDTH - *x,
            };

            FormationSlot {
                id: id_offset + index as u32,
                side,
                role: *role,
                position: Vector2::new(x, *y),
            }
        })
}
