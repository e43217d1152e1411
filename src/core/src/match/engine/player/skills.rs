use crate::r#match::{MatchRng, PlayerRole};
use rand::RngExt;
use serde::Serialize;

pub const SKILL_MIN: f32 = 0.1;
pub const SKILL_MAX: f32 = 1.0;

const SKILL_JITTER: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSkills {
    pub dribbling: f32,
    pub passing: f32,
    pub defensive_awareness: f32,
}

impl PlayerSkills {
    pub fn new(dribbling: f32, passing: f32, defensive_awareness: f32) -> Self {
        PlayerSkills {
            dribbling: dribbling.clamp(SKILL_MIN, SKILL_MAX),
            passing: passing.clamp(SKILL_MIN, SKILL_MAX),
            defensive_awareness: defensive_awareness.clamp(SKILL_MIN, SKILL_MAX),
        }
    }

    /// Role band, with jitter for the outfield creative roles.
    pub fn for_role(role: PlayerRole, rng: &mut MatchRng) -> Self {
        let mut jitter = || (rng.random::<f32>() - 0.5) * SKILL_JITTER;

        match role {
            PlayerRole::Goalkeeper => PlayerSkills::new(0.1, 0.7, 0.9),
            PlayerRole::Defender => PlayerSkills::new(0.3, 0.6, 1.0),
            PlayerRole::Midfielder => PlayerSkills::new(0.8 + jitter(), 0.9 + jitter(), 0.7 + jitter()),
            PlayerRole::Forward => PlayerSkills::new(1.0 + jitter(), 0.6 + jitter(), 0.4 + jitter()),
        }
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.dribbling, self.passing, self.defensive_awareness]
            .iter()
            .all(|s| (SKILL_MIN..=SKILL_MAX).contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_skills_are_clamped() {
        let skills = PlayerSkills::new(1.04, 0.02, 0.5);

        assert_eq!(skills.dribbling, SKILL_MAX);
        assert_eq!(skills.passing, SKILL_MIN);
        assert!(skills.is_within_bounds());
    }

    #[test]
    fn test_role_bands_stay_in_bounds() {
        let mut rng = MatchRng::seed_from_u64(7);

        for _ in 0..200 {
            for role in [
                PlayerRole::Goalkeeper,
                PlayerRole::Defender,
                PlayerRole::Midfielder,
                PlayerRole::Forward,
            ] {
                assert!(PlayerSkills::for_role(role, &mut rng).is_within_bounds());
            }
        }
    }

    #[test]
    fn test_forward_jitter_is_narrow() {
        let mut rng = MatchRng::seed_from_u64(11);

        for _ in 0..100 {
            let skills = PlayerSkills::for_role(PlayerRole::Forward, &mut rng);

            assert!(skills.dribbling >= 0.949);
            assert!((skills.passing - 0.6).abs() <= 0.051);
            assert!((skills.defensive_awareness - 0.4).abs() <= 0.051);
        }
    }

    #[test]
    fn test_keeper_band_is_fixed() {
        let mut rng = MatchRng::seed_from_u64(3);

        assert_eq!(
            PlayerSkills::for_role(PlayerRole::Goalkeeper, &mut rng),
            PlayerSkills::new(0.1, 0.7, 0.9)
        );
    }
}
