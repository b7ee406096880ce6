//! Streak multipliers and daily streak bookkeeping.

use chrono::NaiveDate;

/// Minimum streak length → XP multiplier, highest threshold first.
const STREAK_MULTIPLIERS: [(u32, f64); 4] = [(30, 2.0), (14, 1.5), (7, 1.25), (3, 1.1)];

const BASE_MULTIPLIER: f64 = 1.0;

pub fn get_streak_multiplier(streak_days: u32) -> f64 {
    STREAK_MULTIPLIERS
        .iter()
        .find(|(min_days, _)| streak_days >= *min_days)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(BASE_MULTIPLIER)
}

/// Scales `base_xp` by the streak multiplier and truncates toward zero.
///
/// The product is taken in `f64` and floored, so results match the reward
/// economy bit for bit (`10 XP` on a 7-day streak is `12.5` → 12).
pub fn apply_streak_bonus(base_xp: u32, streak_days: u32) -> u32 {
    (f64::from(base_xp) * get_streak_multiplier(streak_days)).floor() as u32
}

/// Result of registering activity on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak_days: u32,
    /// `false` when the student was already active today.
    pub is_new_day: bool,
}

/// Advances a streak for activity on `today`.
///
/// Same day keeps the streak (at least 1), the following day extends it,
/// and a gap or a first visit restarts it at 1.
pub fn update_streak(last_active: Option<NaiveDate>, today: NaiveDate, current: u32) -> StreakUpdate {
    match last_active {
        None => StreakUpdate {
            streak_days: 1,
            is_new_day: true,
        },
        Some(last) => match (today - last).num_days() {
            d if d <= 0 => StreakUpdate {
                streak_days: current.max(1),
                is_new_day: false,
            },
            1 => StreakUpdate {
                streak_days: current.saturating_add(1),
                is_new_day: true,
            },
            _ => StreakUpdate {
                streak_days: 1,
                is_new_day: true,
            },
        },
    }
}

/// Streak length that still counts on `today`.
///
/// A stored streak only holds while the last activity was today or
/// yesterday; after a longer gap (or with no activity at all) it is 0 until
/// the next check-in restarts it.
pub fn active_streak(last_active: Option<NaiveDate>, today: NaiveDate, streak_days: u32) -> u32 {
    match last_active.map(|last| (today - last).num_days()) {
        Some(gap) if gap <= 1 => streak_days,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_ties_favor_higher_tier() {
        assert_eq!(get_streak_multiplier(0), 1.0);
        assert_eq!(get_streak_multiplier(2), 1.0);
        assert_eq!(get_streak_multiplier(3), 1.1);
        assert_eq!(get_streak_multiplier(6), 1.1);
        assert_eq!(get_streak_multiplier(7), 1.25);
        assert_eq!(get_streak_multiplier(14), 1.5);
        assert_eq!(get_streak_multiplier(29), 1.5);
        assert_eq!(get_streak_multiplier(30), 2.0);
        assert_eq!(get_streak_multiplier(365), 2.0);
    }

    #[test]
    fn bonus_is_floored() {
        assert_eq!(apply_streak_bonus(100, 7), 125);
        assert_eq!(apply_streak_bonus(10, 7), 12);
        assert_eq!(apply_streak_bonus(55, 3), 60);
        assert_eq!(apply_streak_bonus(150, 30), 300);
        assert_eq!(apply_streak_bonus(50, 0), 50);
        assert_eq!(apply_streak_bonus(0, 30), 0);
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn first_visit_starts_streak() {
        let u = update_streak(None, day(10), 0);
        assert_eq!(u.streak_days, 1);
        assert!(u.is_new_day);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let u = update_streak(Some(day(9)), day(10), 4);
        assert_eq!(u.streak_days, 5);
        assert!(u.is_new_day);
    }

    #[test]
    fn same_day_keeps_streak() {
        let u = update_streak(Some(day(10)), day(10), 4);
        assert_eq!(u.streak_days, 4);
        assert!(!u.is_new_day);

        let u = update_streak(Some(day(10)), day(10), 0);
        assert_eq!(u.streak_days, 1);
    }

    #[test]
    fn gap_resets_streak() {
        let u = update_streak(Some(day(7)), day(10), 12);
        assert_eq!(u.streak_days, 1);
        assert!(u.is_new_day);
    }

    #[test]
    fn lapsed_streak_is_not_active() {
        assert_eq!(active_streak(Some(day(10)), day(10), 12), 12);
        assert_eq!(active_streak(Some(day(9)), day(10), 12), 12);
        assert_eq!(active_streak(Some(day(8)), day(10), 12), 0);
        assert_eq!(active_streak(None, day(10), 12), 0);
        assert_eq!(get_streak_multiplier(active_streak(Some(day(1)), day(10), 30)), 1.0);
    }
}
