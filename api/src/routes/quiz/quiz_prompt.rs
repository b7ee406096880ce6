//! Prompt assembly and parsing of LLM quiz output.

use profile_store::models::{QuizLevel, QuizQuestion};
use serde::Deserialize;
use thiserror::Error;

/// Answer choices every generated question must offer.
pub const OPTIONS_PER_QUESTION: usize = 4;

pub const SYSTEM_PROMPT: &str = "You write multiple-choice quizzes that teach responsible gambling: \
odds and house edge, bankroll limits, recognising harmful play and where to get help. \
Never encourage gambling. Answer with JSON only.";

#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("no JSON found in model output")]
    NoJson,

    #[error("model output is not valid quiz JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {index}: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("expected {expected} questions, got {got}")]
    TooFew { expected: usize, got: usize },
}

/// Builds the user prompt. Course material is included only when retrieval
/// found something.
pub fn build_prompt(topic: &str, level: QuizLevel, count: usize, context: &str) -> String {
    let mut prompt = format!(
        "Create a {level} quiz with exactly {count} questions about \"{topic}\".\n\
         Each question has exactly {OPTIONS_PER_QUESTION} options, one correct answer \
         (0-based index) and a one-sentence explanation.\n\n"
    );
    if !context.is_empty() {
        prompt.push_str("Base the questions on this course material:\n\n");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }
    prompt.push_str(
        "Respond with JSON in this shape:\n\
         {\"questions\": [{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \
         \"correctAnswer\": 0, \"explanation\": \"...\"}]}",
    );
    prompt
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Wrapped { questions: Vec<QuizQuestion> },
    Bare(Vec<QuizQuestion>),
}

/// Extracts and validates `expected` questions from raw model output.
///
/// Tolerates markdown code fences and chatter around the JSON. Extra
/// questions are dropped; fewer than `expected` is an error.
pub fn parse_questions(raw: &str, expected: usize) -> Result<Vec<QuizQuestion>, QuizParseError> {
    let mut questions = read_payload(raw)?;

    if questions.len() < expected {
        return Err(QuizParseError::TooFew {
            expected,
            got: questions.len(),
        });
    }
    questions.truncate(expected);

    for (index, q) in questions.iter_mut().enumerate() {
        validate(index, q)?;
    }
    Ok(questions)
}

fn validate(index: usize, q: &mut QuizQuestion) -> Result<(), QuizParseError> {
    let invalid = |reason: &str| QuizParseError::Invalid {
        index,
        reason: reason.to_string(),
    };

    q.question = q.question.trim().to_string();
    q.explanation = q.explanation.trim().to_string();
    for option in &mut q.options {
        *option = option.trim().to_string();
    }

    if q.question.is_empty() {
        return Err(invalid("empty question text"));
    }
    if q.options.len() < 2 {
        return Err(invalid("fewer than two options"));
    }
    if q.options.iter().any(String::is_empty) {
        return Err(invalid("empty option"));
    }
    if q.correct_answer >= q.options.len() {
        return Err(invalid("correctAnswer is out of range"));
    }
    Ok(())
}

/// First candidate slice that deserializes as a quiz payload.
fn read_payload(raw: &str) -> Result<Vec<QuizQuestion>, QuizParseError> {
    let mut last_err = None;
    for candidate in json_candidates(raw) {
        match serde_json::from_str::<QuizPayload>(candidate) {
            Ok(QuizPayload::Wrapped { questions } | QuizPayload::Bare(questions)) => {
                return Ok(questions);
            }
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.map_or(QuizParseError::NoJson, QuizParseError::Json))
}

/// A ```` ```json ```` fence body first, then every span from an opening
/// `{`/`[` to the last matching `}`/`]`, in order of appearance.
fn json_candidates(raw: &str) -> impl Iterator<Item = &str> {
    let fenced = raw
        .split_once("```json")
        .and_then(|(_, rest)| rest.split_once("```"))
        .map(|(body, _)| body.trim());
    let spans = raw.match_indices(['{', '[']).filter_map(move |(start, open)| {
        let close = if open == "{" { '}' } else { ']' };
        let end = raw.rfind(close)?;
        (end > start).then(|| &raw[start..=end])
    });
    fenced.into_iter().chain(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::QUIZ_JSON;

    #[test]
    fn parses_fenced_wrapped_output() {
        let qs = parse_questions(QUIZ_JSON, 3).unwrap();
        assert_eq!(qs.len(), 3);
        assert_eq!(qs[2].correct_answer, 1);
    }

    #[test]
    fn parses_bare_array_with_chatter() {
        let raw = r#"Sure! Here it is: [{"question":" Q ","options":["a","b"],"correctAnswer":1}] Enjoy."#;
        let qs = parse_questions(raw, 1).unwrap();
        assert_eq!(qs[0].question, "Q");
        assert_eq!(qs[0].explanation, "");
    }

    #[test]
    fn skips_brackets_in_leading_chatter() {
        let raw = r#"Here are [3] questions: {"questions": [
            {"question":"A","options":["a","b"],"correctAnswer":0},
            {"question":"B","options":["a","b"],"correctAnswer":1},
            {"question":"C","options":["a","b"],"correctAnswer":0}
        ]}"#;
        let qs = parse_questions(raw, 3).unwrap();
        assert_eq!(qs[1].question, "B");
        assert_eq!(qs[1].correct_answer, 1);
    }

    #[test]
    fn fence_wins_over_prose_brackets() {
        let raw = "Quiz {draft} below.\n```json\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\"],\"correctAnswer\":0}]\n```\nDone {ok}.";
        assert_eq!(parse_questions(raw, 1).unwrap()[0].question, "Q");
    }

    #[test]
    fn drops_extra_questions() {
        assert_eq!(parse_questions(QUIZ_JSON, 2).unwrap().len(), 2);
    }

    #[test]
    fn rejects_short_or_broken_output() {
        assert!(matches!(parse_questions(QUIZ_JSON, 5), Err(QuizParseError::TooFew { expected: 5, got: 3 })));
        assert!(matches!(parse_questions("I cannot help with that.", 3), Err(QuizParseError::NoJson)));
        assert!(matches!(parse_questions("{\"questions\": [", 3), Err(QuizParseError::NoJson | QuizParseError::Json(_))));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let raw = r#"[{"question":"Q","options":["a","b"],"correctAnswer":2}]"#;
        assert!(matches!(
            parse_questions(raw, 1),
            Err(QuizParseError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn prompt_includes_context_only_when_present() {
        let with = build_prompt("odds", QuizLevel::Beginner, 3, "Roulette has 37 pockets.");
        assert!(with.contains("beginner quiz with exactly 3 questions"));
        assert!(with.contains("Roulette has 37 pockets."));

        let without = build_prompt("odds", QuizLevel::Beginner, 3, "");
        assert!(!without.contains("course material"));
    }
}
