//! Gamification engine: turns learning events into XP and XP into levels.
//!
//! Every function here is pure. Persistence of the running XP total and the
//! streak counter belongs to the profile store; callers read the current
//! values, run them through this crate and write the result back.
//!
//! - [`xp`]: quiz rewards and level arithmetic (100 XP per level band)
//! - [`levels`]: level → title/badge/color lookup
//! - [`streak`]: streak multipliers, streak bonus and daily streak updates

pub mod levels;
pub mod streak;
pub mod xp;

pub use levels::{LevelTitle, LevelView, get_level_title};
pub use streak::{
    StreakUpdate, active_streak, apply_streak_bonus, get_streak_multiplier, update_streak,
};
pub use xp::{
    ATTEMPT_XP, DAILY_LOGIN_XP, FIRST_TRY_BONUS, PASS_THRESHOLD, PASS_XP, PERFECT_XP,
    XP_PER_LEVEL, calculate_level, calculate_level_progress, calculate_quiz_xp,
    calculate_xp_to_next_level, leveled_up,
};
