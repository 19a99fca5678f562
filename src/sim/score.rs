//! Streak bookkeeping and the difficulty ramp
//!
//! Wind and hoop speed are never stored authoritatively anywhere else; they
//! are re-derived from the streak after every streak-changing event.

use rand::Rng;
use serde::Serialize;

use crate::consts::*;

/// Consecutive-scores counter and session-best tracker.
///
/// The high score is monotonically non-decreasing and only resets with the
/// process (nothing is persisted between page loads).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub streak: u32,
    pub high_score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a made shot. Returns the new streak.
    pub fn record_hit(&mut self) -> u32 {
        self.streak += 1;
        self.high_score = self.high_score.max(self.streak);
        self.streak
    }

    /// A miss ends the run: commit the streak to the session best, then
    /// reset it. Returns the broken streak length.
    pub fn end_streak(&mut self) -> u32 {
        let broken = self.streak;
        self.high_score = self.high_score.max(self.streak);
        self.streak = 0;
        broken
    }
}

/// Difficulty derived from the current streak
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    pub wind: f32,
    pub hoop_speed: f32,
}

/// Step function of the streak.
///
/// Wind magnitude grows a tier every [`WIND_STREAK_TIER`] scores and is
/// re-rolled on every call; hoop speed grows a tier every
/// [`HOOP_STREAK_TIER`] scores and is exact. Both drop to zero the moment
/// the streak does.
pub fn difficulty_for_streak(streak: u32, rng: &mut impl Rng) -> Difficulty {
    let wind = if streak >= WIND_STREAK_TIER {
        let tier = (streak / WIND_STREAK_TIER) as f32;
        (rng.random::<f32>() - 0.5) * WIND_SCALE * tier
    } else {
        0.0
    };

    let hoop_speed = if streak >= HOOP_STREAK_TIER {
        HOOP_SPEED_BASE + HOOP_SPEED_STEP * (streak / HOOP_STREAK_TIER) as f32
    } else {
        0.0
    };

    Difficulty { wind, hoop_speed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_record_hit_tracks_best() {
        let mut board = Scoreboard::new();
        assert_eq!(board.record_hit(), 1);
        assert_eq!(board.record_hit(), 2);
        assert_eq!(board.high_score, 2);
    }

    #[test]
    fn test_end_streak_commits_then_resets() {
        let mut board = Scoreboard::new();
        for _ in 0..7 {
            board.record_hit();
        }
        let broken = board.end_streak();
        assert_eq!(broken, 7);
        assert_eq!(board.streak, 0);
        assert_eq!(board.high_score, 7);

        // A shorter later run must not lower the best
        for _ in 0..3 {
            board.record_hit();
        }
        board.end_streak();
        assert_eq!(board.high_score, 7);
    }

    #[test]
    fn test_end_streak_at_zero_is_a_noop() {
        let mut board = Scoreboard { streak: 0, high_score: 4 };
        assert_eq!(board.end_streak(), 0);
        assert_eq!(board.high_score, 4);
    }

    #[test]
    fn test_hoop_speed_steps() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(difficulty_for_streak(0, &mut rng).hoop_speed, 0.0);
        assert_eq!(difficulty_for_streak(9, &mut rng).hoop_speed, 0.0);
        assert_eq!(difficulty_for_streak(10, &mut rng).hoop_speed, 1.0);
        assert_eq!(difficulty_for_streak(19, &mut rng).hoop_speed, 1.0);
        assert_eq!(difficulty_for_streak(20, &mut rng).hoop_speed, 1.5);
        assert_eq!(difficulty_for_streak(30, &mut rng).hoop_speed, 2.0);
    }

    #[test]
    fn test_wind_zero_below_tier() {
        let mut rng = Pcg32::seed_from_u64(2);
        for streak in 0..WIND_STREAK_TIER {
            assert_eq!(difficulty_for_streak(streak, &mut rng).wind, 0.0);
        }
    }

    #[test]
    fn test_wind_rerolls_each_call() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = difficulty_for_streak(25, &mut rng).wind;
        let b = difficulty_for_streak(25, &mut rng).wind;
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_wind_stays_in_tier_bounds(streak in 0u32..500, seed: u64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let d = difficulty_for_streak(streak, &mut rng);
            let bound = 0.5 * WIND_SCALE * (streak / WIND_STREAK_TIER) as f32;
            prop_assert!(d.wind.abs() <= bound);
        }

        #[test]
        fn prop_hoop_speed_is_exact(streak in 0u32..500, seed: u64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let d = difficulty_for_streak(streak, &mut rng);
            let expected = if streak < HOOP_STREAK_TIER {
                0.0
            } else {
                HOOP_SPEED_BASE + HOOP_SPEED_STEP * (streak / HOOP_STREAK_TIER) as f32
            };
            prop_assert_eq!(d.hoop_speed, expected);
        }
    }
}
