//! Quiz scoring engine.
//!
//! The quiz is stateless per submission: a GET presents the questions, a
//! validated POST grades them and commits the earned points to the user's
//! cumulative score. There is no partial-save between requests — the only
//! state that survives is the score itself.

use crate::db::{users, StoreError};
use crate::state::DbPool;

pub const Q1_ANSWER: &str = "q1value4";
pub const Q2_ANSWER: &str = "q2value2";
pub const POINTS_PER_ANSWER: i64 = 10;
pub const QUESTION_COUNT: u32 = 2;

#[derive(Debug, Clone)]
pub struct QuizSubmission {
    pub q1: String,
    pub q2: String,
}

/// Feedback tier shown to the user: more than one correct answer gets the
/// congratulatory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Success,
    Low,
}

#[derive(Debug, Clone, Copy)]
pub struct Graded {
    pub correct_count: u32,
    pub points: i64,
}

/// Grade a submission against the answer key. Each answer is evaluated
/// independently.
pub fn grade(submission: &QuizSubmission) -> Graded {
    let mut correct_count = 0;
    if submission.q1 == Q1_ANSWER {
        correct_count += 1;
    }
    if submission.q2 == Q2_ANSWER {
        correct_count += 1;
    }

    Graded {
        correct_count,
        points: i64::from(correct_count) * POINTS_PER_ANSWER,
    }
}

#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub correct_count: u32,
    pub total: u32,
    pub points_awarded: i64,
    pub new_score: i64,
    pub tier: Tier,
}

/// Grade and commit. The score update is committed for every validated
/// submission, including one with zero correct answers; the increment runs
/// as a single in-database update so concurrent submissions never lose
/// points.
pub fn submit(
    pool: &DbPool,
    user_id: &str,
    submission: &QuizSubmission,
) -> Result<QuizOutcome, StoreError> {
    let graded = grade(submission);
    let new_score = users::add_score(pool, user_id, graded.points)?;

    let tier = if graded.correct_count > 1 {
        Tier::Success
    } else {
        Tier::Low
    };

    Ok(QuizOutcome {
        correct_count: graded.correct_count,
        total: QUESTION_COUNT,
        points_awarded: graded.points,
        new_score,
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(q1: &str, q2: &str) -> QuizSubmission {
        QuizSubmission {
            q1: q1.to_string(),
            q2: q2.to_string(),
        }
    }

    #[test]
    fn both_correct_scores_twenty() {
        let graded = grade(&submission(Q1_ANSWER, Q2_ANSWER));
        assert_eq!(graded.correct_count, 2);
        assert_eq!(graded.points, 20);
    }

    #[test]
    fn answers_are_graded_independently() {
        let first_only = grade(&submission(Q1_ANSWER, "q2value1"));
        assert_eq!(first_only.correct_count, 1);
        assert_eq!(first_only.points, 10);

        let second_only = grade(&submission("q1value1", Q2_ANSWER));
        assert_eq!(second_only.correct_count, 1);
        assert_eq!(second_only.points, 10);
    }

    #[test]
    fn wrong_answers_score_nothing() {
        let graded = grade(&submission("q1value1", "q2value3"));
        assert_eq!(graded.correct_count, 0);
        assert_eq!(graded.points, 0);
    }

    #[test]
    fn crossed_answers_do_not_match() {
        // The answer key is per-question
        let graded = grade(&submission(Q2_ANSWER, Q1_ANSWER));
        assert_eq!(graded.correct_count, 0);
    }
}
