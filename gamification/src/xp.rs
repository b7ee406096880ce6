//! Quiz rewards and level arithmetic.

/// XP for a perfect score.
pub const PERFECT_XP: u32 = 100;
/// Extra XP for a perfect score on the first attempt.
pub const FIRST_TRY_BONUS: u32 = 50;
/// XP for a passing (but not perfect) score.
pub const PASS_XP: u32 = 50;
/// Participation credit for a failing score.
pub const ATTEMPT_XP: u32 = 10;
/// XP granted once per new active day.
pub const DAILY_LOGIN_XP: u32 = 10;
/// Width of one level band.
pub const XP_PER_LEVEL: u32 = 100;
/// Minimum fraction of correct answers that counts as a pass.
pub const PASS_THRESHOLD: f64 = 0.7;

/// Tiered XP reward for a single quiz attempt.
///
/// `score` is the fraction of correct answers and `attempts` is the 1-based
/// attempt number for this quiz. Inputs are not range-checked: a NaN or
/// negative score fails both threshold comparisons and earns [`ATTEMPT_XP`],
/// and `attempts == 0` simply never receives the first-try bonus.
pub fn calculate_quiz_xp(score: f64, attempts: u32) -> u32 {
    if score >= 1.0 {
        if attempts == 1 {
            PERFECT_XP + FIRST_TRY_BONUS
        } else {
            PERFECT_XP
        }
    } else if score >= PASS_THRESHOLD {
        PASS_XP
    } else {
        ATTEMPT_XP
    }
}

/// 1-based level for a cumulative XP total.
pub fn calculate_level(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// XP still missing until the upper edge of the current level band.
///
/// Exactly on a boundary (e.g. 100 XP, level 2) this reports a full band
/// (100), i.e. the distance to level 3. In the top band, whose edge does not
/// fit in `u32`, the distance is measured to `u32::MAX` instead.
pub fn calculate_xp_to_next_level(total_xp: u32) -> u32 {
    calculate_level(total_xp)
        .checked_mul(XP_PER_LEVEL)
        .map_or(u32::MAX - total_xp, |edge| edge - total_xp)
}

/// Share of the current band already earned, as a percentage in `[0, 100)`.
pub fn calculate_level_progress(total_xp: u32) -> f64 {
    let level = calculate_level(total_xp);
    let into_band = total_xp - (level - 1) * XP_PER_LEVEL;
    f64::from(into_band) / f64::from(XP_PER_LEVEL) * 100.0
}

/// True when going from `before` to `after` crosses at least one band edge.
pub fn leveled_up(before: u32, after: u32) -> bool {
    calculate_level(after) > calculate_level(before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_first_try_gets_bonus() {
        assert_eq!(calculate_quiz_xp(1.0, 1), PERFECT_XP + FIRST_TRY_BONUS);
        assert_eq!(calculate_quiz_xp(1.0, 1), 150);
    }

    #[test]
    fn perfect_retry_has_no_bonus() {
        assert_eq!(calculate_quiz_xp(1.0, 2), PERFECT_XP);
        assert_eq!(calculate_quiz_xp(1.0, 7), PERFECT_XP);
    }

    #[test]
    fn pass_tier_ignores_attempts() {
        for score in [0.7, 0.75, 0.9, 0.999] {
            for attempts in [1, 2, 10] {
                assert_eq!(calculate_quiz_xp(score, attempts), PASS_XP);
            }
        }
    }

    #[test]
    fn failing_score_gets_participation_credit() {
        assert_eq!(calculate_quiz_xp(0.0, 1), ATTEMPT_XP);
        assert_eq!(calculate_quiz_xp(0.69, 1), ATTEMPT_XP);
    }

    #[test]
    fn nan_score_lands_in_attempt_tier() {
        assert_eq!(calculate_quiz_xp(f64::NAN, 1), ATTEMPT_XP);
        assert_eq!(calculate_quiz_xp(-0.5, 1), ATTEMPT_XP);
    }

    #[test]
    fn level_is_band_index_plus_one() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(250), 3);
        for xp in (0..5_000).step_by(37) {
            assert_eq!(calculate_level(xp), xp / 100 + 1);
        }
    }

    #[test]
    fn xp_to_next_level_at_boundary_is_full_band() {
        assert_eq!(calculate_xp_to_next_level(0), 100);
        assert_eq!(calculate_xp_to_next_level(40), 60);
        assert_eq!(calculate_xp_to_next_level(100), 100);
        assert_eq!(calculate_xp_to_next_level(199), 1);
    }

    #[test]
    fn top_band_does_not_overflow() {
        assert_eq!(calculate_xp_to_next_level(u32::MAX), 0);
        assert_eq!(calculate_xp_to_next_level(u32::MAX - 5), 5);
        // 4_294_967_200 is the last edge that fits.
        assert_eq!(calculate_xp_to_next_level(4_294_967_199), 1);
        assert_eq!(calculate_level(u32::MAX), 42_949_673);
        let p = calculate_level_progress(u32::MAX);
        assert!((0.0..100.0).contains(&p));
    }

    #[test]
    fn progress_stays_below_hundred() {
        assert_eq!(calculate_level_progress(0), 0.0);
        assert_eq!(calculate_level_progress(150), 50.0);
        assert_eq!(calculate_level_progress(299), 99.0);
        for xp in 0..1_000 {
            let p = calculate_level_progress(xp);
            assert!((0.0..100.0).contains(&p), "xp={xp} progress={p}");
        }
    }

    #[test]
    fn level_up_detection() {
        assert!(leveled_up(90, 100));
        assert!(leveled_up(50, 350));
        assert!(!leveled_up(100, 199));
    }
}
