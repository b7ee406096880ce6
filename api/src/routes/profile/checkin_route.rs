use std::sync::Arc;

use axum::{extract::State, response::Response};
use chrono::{NaiveDate, Utc};
use gamification::{
    DAILY_LOGIN_XP, LevelView, apply_streak_bonus, get_streak_multiplier, leveled_up, update_streak,
};
use tracing::info;

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::AppResult,
    routes::profile::profile_response::CheckinResponse,
};

/// Registers today's activity: advances the streak and, once per day,
/// awards the daily XP scaled by the new streak.
pub async fn checkin_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let body = check_in(&state, &user.id, Utc::now().date_naive()).await?;
    Ok(response_envelope::ok(body))
}

async fn check_in(state: &AppState, user_id: &str, today: NaiveDate) -> AppResult<CheckinResponse> {
    let mut profile = state.store.get_or_create_profile(user_id).await?;
    let update = update_streak(profile.last_active_date, today, profile.streak_days);

    let before = profile.total_xp;
    let xp_awarded = if update.is_new_day {
        apply_streak_bonus(DAILY_LOGIN_XP, update.streak_days)
    } else {
        0
    };

    if update.is_new_day {
        profile.streak_days = update.streak_days;
        profile.last_active_date = Some(today);
        profile.total_xp = before.saturating_add(xp_awarded);
        state.store.save_profile(&profile).await?;
        info!(user = %user_id, streak = update.streak_days, xp = xp_awarded, "check-in recorded");
    }

    Ok(CheckinResponse {
        streak_days: update.streak_days,
        streak_multiplier: get_streak_multiplier(update.streak_days),
        is_new_day: update.is_new_day,
        xp_awarded,
        level: LevelView::from_total_xp(profile.total_xp),
        leveled_up: leveled_up(before, profile.total_xp),
    })
}

#[cfg(test)]
mod tests {
    use profile_store::ProfileStore;

    use super::*;
    use crate::core::test_support::harness;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn first_checkin_starts_streak_and_awards_xp() {
        let h = harness("", Vec::new());
        let r = check_in(&h.state, "u1", day(1)).await.unwrap();
        assert_eq!(r.streak_days, 1);
        assert!(r.is_new_day);
        assert_eq!(r.xp_awarded, 10);
    }

    #[tokio::test]
    async fn same_day_is_idempotent() {
        let h = harness("", Vec::new());
        check_in(&h.state, "u1", day(1)).await.unwrap();
        let again = check_in(&h.state, "u1", day(1)).await.unwrap();
        assert!(!again.is_new_day);
        assert_eq!(again.xp_awarded, 0);
        assert_eq!(h.store.get_or_create_profile("u1").await.unwrap().total_xp, 10);
    }

    #[tokio::test]
    async fn consecutive_days_build_multiplier_and_gaps_reset() {
        let h = harness("", Vec::new());
        for d in 1..=2 {
            check_in(&h.state, "u1", day(d)).await.unwrap();
        }
        // Day 3 of the streak hits the 1.1 tier: floor(10 * 1.1) = 11.
        let third = check_in(&h.state, "u1", day(3)).await.unwrap();
        assert_eq!(third.streak_days, 3);
        assert_eq!(third.xp_awarded, 11);

        let after_gap = check_in(&h.state, "u1", day(10)).await.unwrap();
        assert_eq!(after_gap.streak_days, 1);
        assert_eq!(after_gap.xp_awarded, 10);
        assert_eq!(h.store.get_or_create_profile("u1").await.unwrap().total_xp, 41);
    }
}
