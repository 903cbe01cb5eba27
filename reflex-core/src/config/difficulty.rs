//! Difficulty profiles
//!
//! A profile sets the first level's time budget and how much it shrinks
//! per level. Times are whole milliseconds.

use super::engine::MIN_TIME_LIMIT_MS;

/// Named time-budget profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DifficultyProfile {
    /// Menu label
    pub name: &'static str,
    /// Time limit at level 1 (ms)
    pub base_time_ms: u32,
    /// Reduction per level (ms)
    pub decrement_ms: u32,
}

pub const EASY: DifficultyProfile = DifficultyProfile::new("EASY", 5000, 200);
pub const MEDIUM: DifficultyProfile = DifficultyProfile::new("MEDIUM", 4000, 250);
pub const HARD: DifficultyProfile = DifficultyProfile::new("HARD", 3000, 300);

/// Profiles in menu order
pub const DIFFICULTIES: [DifficultyProfile; 3] = [EASY, MEDIUM, HARD];

impl DifficultyProfile {
    pub const fn new(name: &'static str, base_time_ms: u32, decrement_ms: u32) -> Self {
        Self {
            name,
            base_time_ms,
            decrement_ms,
        }
    }

    /// Time limit for a level
    ///
    /// `max(base − (level − 1) · decrement, MIN_TIME_LIMIT_MS)`. Level 0 is
    /// treated as level 1.
    pub fn time_limit_ms(&self, level: u8) -> u32 {
        let steps = u32::from(level.saturating_sub(1));
        self.base_time_ms
            .saturating_sub(steps.saturating_mul(self.decrement_ms))
            .max(MIN_TIME_LIMIT_MS)
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        EASY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn expected(profile: &DifficultyProfile, level: u8) -> u32 {
        let raw = i64::from(profile.base_time_ms)
            - (i64::from(level) - 1) * i64::from(profile.decrement_ms);
        raw.max(i64::from(MIN_TIME_LIMIT_MS)) as u32
    }

    #[test]
    fn test_limits_levels_1_to_12() {
        for profile in DIFFICULTIES {
            for level in 1..=12u8 {
                assert_eq!(
                    profile.time_limit_ms(level),
                    expected(&profile, level),
                    "{} level {}",
                    profile.name,
                    level
                );
            }
        }
    }

    #[test]
    fn test_easy_second_level() {
        assert_eq!(EASY.time_limit_ms(1), 5000);
        assert_eq!(EASY.time_limit_ms(2), 4800);
    }

    #[test]
    fn test_floor_reached_and_held() {
        // HARD hits 1.5 s at level 6, MEDIUM at level 11
        assert_eq!(HARD.time_limit_ms(5), 1800);
        for level in 6..=12 {
            assert_eq!(HARD.time_limit_ms(level), MIN_TIME_LIMIT_MS);
        }
        assert_eq!(MEDIUM.time_limit_ms(10), 1750);
        assert_eq!(MEDIUM.time_limit_ms(11), MIN_TIME_LIMIT_MS);
        assert_eq!(MEDIUM.time_limit_ms(12), MIN_TIME_LIMIT_MS);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(EASY.time_limit_ms(0), EASY.time_limit_ms(1));
    }

    proptest! {
        #[test]
        fn prop_limit_matches_formula(index in 0usize..3, level in 1u8..=u8::MAX) {
            let profile = DIFFICULTIES[index];
            prop_assert_eq!(profile.time_limit_ms(level), expected(&profile, level));
        }

        #[test]
        fn prop_limit_never_increases(index in 0usize..3, level in 1u8..u8::MAX) {
            let profile = DIFFICULTIES[index];
            prop_assert!(profile.time_limit_ms(level + 1) <= profile.time_limit_ms(level));
        }
    }
}
