//! Level titles and the profile-facing level summary.

use serde::Serialize;

use crate::xp::{calculate_level, calculate_level_progress, calculate_xp_to_next_level};

/// Display rank for a level range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelTitle {
    pub title: &'static str,
    pub badge: &'static str,
    /// Theme color token understood by the frontend.
    pub color: &'static str,
}

/// Minimum level → title, highest threshold first. First match wins.
const LEVEL_TITLES: [(u32, LevelTitle); 6] = [
    (
        50,
        LevelTitle {
            title: "Master",
            badge: "👑",
            color: "purple",
        },
    ),
    (
        30,
        LevelTitle {
            title: "Expert",
            badge: "🏆",
            color: "gold",
        },
    ),
    (
        20,
        LevelTitle {
            title: "Advanced",
            badge: "⭐",
            color: "blue",
        },
    ),
    (
        10,
        LevelTitle {
            title: "Intermediate",
            badge: "📚",
            color: "green",
        },
    ),
    (
        5,
        LevelTitle {
            title: "Apprentice",
            badge: "🌱",
            color: "teal",
        },
    ),
    (
        0,
        LevelTitle {
            title: "Novice",
            badge: "🎯",
            color: "gray",
        },
    ),
];

pub fn get_level_title(level: u32) -> LevelTitle {
    LEVEL_TITLES
        .iter()
        .find(|(min_level, _)| level >= *min_level)
        .map(|(_, title)| *title)
        // The last row has threshold 0, so `find` always succeeds.
        .unwrap_or(LEVEL_TITLES[LEVEL_TITLES.len() - 1].1)
}

/// Everything the UI shows about a student's level, derived from total XP.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub total_xp: u32,
    pub level: u32,
    pub progress_percent: f64,
    pub xp_to_next_level: u32,
    #[serde(flatten)]
    pub title: LevelTitle,
}

impl LevelView {
    pub fn from_total_xp(total_xp: u32) -> Self {
        let level = calculate_level(total_xp);
        Self {
            total_xp,
            level,
            progress_percent: calculate_level_progress(total_xp),
            xp_to_next_level: calculate_xp_to_next_level(total_xp),
            title: get_level_title(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(get_level_title(1).title, "Novice");
        assert_eq!(get_level_title(4).title, "Novice");
        assert_eq!(get_level_title(5).title, "Apprentice");
        assert_eq!(get_level_title(10).title, "Intermediate");
        assert_eq!(get_level_title(19).title, "Intermediate");
        assert_eq!(get_level_title(20).title, "Advanced");
        assert_eq!(get_level_title(30).title, "Expert");
        assert_eq!(get_level_title(49).title, "Expert");
        assert_eq!(get_level_title(50).title, "Master");
        assert_eq!(get_level_title(500).title, "Master");
    }

    #[test]
    fn level_zero_falls_back_to_novice() {
        assert_eq!(get_level_title(0).title, "Novice");
    }

    #[test]
    fn table_is_sorted_highest_first() {
        let thresholds: Vec<u32> = LEVEL_TITLES.iter().map(|(t, _)| *t).collect();
        let mut sorted = thresholds.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(thresholds, sorted);
    }

    #[test]
    fn view_combines_all_derived_fields() {
        let view = LevelView::from_total_xp(1_040);
        assert_eq!(view.level, 11);
        assert_eq!(view.progress_percent, 40.0);
        assert_eq!(view.xp_to_next_level, 60);
        assert_eq!(view.title.title, "Intermediate");
    }

    #[test]
    fn view_of_saturated_total_is_top_band() {
        let view = LevelView::from_total_xp(u32::MAX);
        assert_eq!(view.level, 42_949_673);
        assert_eq!(view.xp_to_next_level, 0);
        assert_eq!(view.title, get_level_title(50));
    }

    #[test]
    fn view_serializes_flat_camel_case() {
        let json = serde_json::to_value(LevelView::from_total_xp(0)).unwrap();
        assert_eq!(json["totalXp"], 0);
        assert_eq!(json["xpToNextLevel"], 100);
        assert_eq!(json["title"], "Novice");
        assert_eq!(json["color"], "gray");
    }
}
