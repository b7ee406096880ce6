//! Learning analytics computed from a student's attempt history.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use gamification::PASS_THRESHOLD;
use serde::Serialize;

use crate::models::QuizAttempt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub topic: String,
    pub attempts: u32,
    pub average_score: f64,
    pub best_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_attempts: u32,
    pub distinct_quizzes: u32,
    pub average_score: f64,
    pub best_score: f64,
    pub perfect_scores: u32,
    /// Fraction of attempts that passed, in `[0, 1]`.
    pub pass_rate: f64,
    pub xp_from_quizzes: u32,
    pub topics: Vec<TopicStats>,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Acc {
    attempts: u32,
    score_sum: f64,
    best: f64,
}

impl Acc {
    fn push(&mut self, score: f64) {
        self.attempts += 1;
        self.score_sum += score;
        self.best = self.best.max(score);
    }

    fn average(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.score_sum / f64::from(self.attempts)
        }
    }
}

/// Aggregates attempts. Empty input yields an all-zero report.
/// Topics are listed alphabetically.
pub fn summarize_attempts(attempts: &[QuizAttempt]) -> AnalyticsReport {
    let mut overall = Acc::default();
    let mut per_topic: BTreeMap<&str, Acc> = BTreeMap::new();
    let mut quizzes = HashSet::new();
    let mut perfect = 0u32;
    let mut passed = 0u32;
    let mut xp = 0u32;
    let mut last: Option<DateTime<Utc>> = None;

    for a in attempts {
        overall.push(a.score);
        per_topic.entry(a.topic.as_str()).or_default().push(a.score);
        quizzes.insert(a.quiz_id);
        if a.score >= 1.0 {
            perfect += 1;
        }
        if a.score >= PASS_THRESHOLD {
            passed += 1;
        }
        xp = xp.saturating_add(a.xp_awarded);
        last = last.max(Some(a.created_at));
    }

    let pass_rate = if overall.attempts == 0 {
        0.0
    } else {
        f64::from(passed) / f64::from(overall.attempts)
    };

    AnalyticsReport {
        total_attempts: overall.attempts,
        distinct_quizzes: u32::try_from(quizzes.len()).unwrap_or(u32::MAX),
        average_score: overall.average(),
        best_score: overall.best,
        perfect_scores: perfect,
        pass_rate,
        xp_from_quizzes: xp,
        topics: per_topic
            .into_iter()
            .map(|(topic, acc)| TopicStats {
                topic: topic.to_string(),
                attempts: acc.attempts,
                average_score: acc.average(),
                best_score: acc.best,
            })
            .collect(),
        last_attempt_at: last,
    }
}
