use rand::seq::SliceRandom;

use crate::config::Config;
use crate::db::Database;
use crate::error::{QuizError, Result};
use crate::models::{normalize, AnswerKey, Question, QuizSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Completed,
    /// Terminal error state: a question's correct-answer indicator could not
    /// be resolved and the attempt was dropped rather than mis-scored.
    Aborted,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::InProgress => "InProgress",
            SessionState::Completed => "Completed",
            SessionState::Aborted => "Aborted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// One student attempt: the materialized question order, the cursor and the
/// running score. Owned by exactly one screen at a time and discarded on
/// completion or abandonment; there is no shared session state anywhere else.
#[derive(Debug)]
pub struct QuizSession {
    course: String,
    questions: Vec<Question>,
    index: usize,
    score: u32,
    state: SessionState,
    // Outcome of the scored submission for the current question. `Some`
    // means "awaiting advance"; a repeat submission returns it unchanged.
    pending: Option<AnswerOutcome>,
    partial: bool,
}

impl QuizSession {
    /// Loads a session: fetches a random sample, shuffles per policy and
    /// enters `InProgress`. An empty course fails with `NoQuestions` and no
    /// session is created.
    pub fn start(db: &Database, course: &str, config: &Config) -> Result<Self> {
        if !config.course_allowed(course) {
            return Err(QuizError::InvalidCourseName(course.to_string()));
        }

        let fetched = db.fetch_questions(course, Some(config.sample_size), true)?;
        if fetched.questions.is_empty() {
            return Err(QuizError::NoQuestions(course.to_string()));
        }
        let partial = fetched.is_partial();
        let mut questions = fetched.questions;

        let mut rng = rand::thread_rng();
        if config.shuffle_questions {
            questions.shuffle(&mut rng);
        }
        if config.shuffle_options {
            for q in &mut questions {
                let mut order = [0usize, 1, 2, 3];
                order.shuffle(&mut rng);
                q.apply_option_order(order);
            }
        }

        log::debug!(
            "session on '{}': {} questions{}",
            course,
            questions.len(),
            if partial { " (short of sample size)" } else { "" }
        );

        Ok(Self {
            course: course.to_string(),
            questions,
            index: 0,
            score: 0,
            state: SessionState::InProgress,
            pending: None,
            partial,
        })
    }

    #[cfg(test)]
    fn from_questions(course: &str, questions: Vec<Question>) -> Self {
        Self {
            course: course.to_string(),
            questions,
            index: 0,
            score: 0,
            state: SessionState::InProgress,
            pending: None,
            partial: false,
        }
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// True when the course had fewer questions than the requested sample
    /// size; the attempt proceeds but the caller should tell the user.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// One-based position of the current question.
    pub fn position(&self) -> usize {
        (self.index + 1).min(self.questions.len())
    }

    /// True after a scored submission, before `advance`.
    pub fn awaiting_advance(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_question(&self) -> Result<&Question> {
        match self.state {
            SessionState::InProgress => Ok(&self.questions[self.index]),
            other => Err(QuizError::InvalidState(other.name())),
        }
    }

    /// Scores `choice` against the current question. Empty input is
    /// `NoSelection` and changes nothing. A second call before `advance`
    /// returns the recorded outcome without re-scoring. An unresolvable
    /// indicator aborts the whole attempt.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerOutcome> {
        if self.state != SessionState::InProgress {
            return Err(QuizError::InvalidState(self.state.name()));
        }
        if let Some(outcome) = self.pending {
            return Ok(outcome);
        }
        if choice.trim().is_empty() {
            return Err(QuizError::NoSelection);
        }

        let correct_index = match self.questions[self.index].correct_index() {
            Some(i) => i,
            None => {
                let question = &self.questions[self.index];
                let question_id = question.id;
                let indicator = question.correct_answer.clone();
                self.state = SessionState::Aborted;
                return Err(QuizError::DataIntegrity {
                    question_id,
                    indicator,
                });
            }
        };

        // Accept the option text or its letter tag.
        let question = &self.questions[self.index];
        let matched = match AnswerKey::from_str(choice) {
            Some(key) => key.index() == correct_index,
            None => normalize(choice) == normalize(question.options()[correct_index]),
        };

        let outcome = if matched {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        };
        self.pending = Some(outcome);
        Ok(outcome)
    }

    /// Text of the current question's correct option, for post-submission
    /// feedback. Only meaningful once a submission has been scored.
    pub fn correct_answer_text(&self) -> Option<&str> {
        if self.state != SessionState::InProgress {
            return None;
        }
        self.questions[self.index].correct_text()
    }

    /// Moves past a scored question. Valid only after `submit_answer`;
    /// completes the session when the last question is consumed.
    pub fn advance(&mut self) -> Result<SessionState> {
        if self.state != SessionState::InProgress {
            return Err(QuizError::InvalidState(self.state.name()));
        }
        if self.pending.is_none() {
            return Err(QuizError::NoSelection);
        }

        self.pending = None;
        self.index += 1;
        if self.index == self.questions.len() {
            self.state = SessionState::Completed;
        }
        Ok(self.state)
    }

    /// Final result. Valid only in `Completed`.
    pub fn summary(&self) -> Result<QuizSummary> {
        match self.state {
            SessionState::Completed => Ok(QuizSummary::new(self.score, self.total() as u32)),
            other => Err(QuizError::InvalidState(other.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_stock_courses;

    fn unshuffled_config() -> Config {
        Config {
            shuffle_questions: false,
            ..Config::default()
        }
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        seed_stock_courses(&db).unwrap();
        db
    }

    fn make_question(id: i64, correct: &str) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            option_a: format!("alpha {}", id),
            option_b: format!("bravo {}", id),
            option_c: format!("charlie {}", id),
            option_d: format!("delta {}", id),
            correct_answer: correct.to_string(),
        }
    }

    mod start_tests {
        use super::*;

        #[test]
        fn start_on_seeded_course_enters_in_progress() {
            let db = seeded_db();
            let session = QuizSession::start(&db, "DS 3850", &Config::default()).unwrap();
            assert_eq!(session.state(), SessionState::InProgress);
            assert_eq!(session.total(), 10);
            assert_eq!(session.score(), 0);
            assert_eq!(session.position(), 1);
            assert!(!session.is_partial());
        }

        #[test]
        fn start_on_empty_course_fails_with_no_questions() {
            let db = Database::open_in_memory().unwrap();
            db.create_course("EMPTY 101").unwrap();
            let err = QuizSession::start(&db, "EMPTY 101", &Config::default()).unwrap_err();
            assert!(matches!(err, QuizError::NoQuestions(name) if name == "EMPTY 101"));
        }

        #[test]
        fn start_on_unknown_course_fails() {
            let db = Database::open_in_memory().unwrap();
            let err = QuizSession::start(&db, "NOPE 1", &Config::default()).unwrap_err();
            assert!(matches!(err, QuizError::UnknownCourse(_)));
        }

        #[test]
        fn short_course_yields_partial_session_with_all_questions() {
            let db = seeded_db();
            // trim HIST 4093 down to 3 questions
            let ids: Vec<i64> = db
                .list_all_questions("HIST 4093")
                .unwrap()
                .iter()
                .map(|q| q.id)
                .collect();
            for id in &ids[3..] {
                db.delete_question("HIST 4093", *id).unwrap();
            }

            let session = QuizSession::start(&db, "HIST 4093", &Config::default()).unwrap();
            assert_eq!(session.total(), 3);
            assert!(session.is_partial());
        }

        #[test]
        fn allow_list_blocks_unlisted_courses() {
            let db = seeded_db();
            let config = Config {
                allowed_courses: Some(vec!["DS 3850".to_string()]),
                ..Config::default()
            };
            assert!(QuizSession::start(&db, "DS 3850", &config).is_ok());
            let err = QuizSession::start(&db, "MKT 4100", &config).unwrap_err();
            assert!(matches!(err, QuizError::InvalidCourseName(_)));
        }

        #[test]
        fn option_shuffle_policy_preserves_correct_answers() {
            let db = seeded_db();
            let config = Config {
                shuffle_options: true,
                ..Config::default()
            };
            let mut session = QuizSession::start(&db, "DS 3860", &config).unwrap();
            while session.state() == SessionState::InProgress {
                let correct = session
                    .current_question()
                    .unwrap()
                    .correct_text()
                    .expect("seed data resolves")
                    .to_string();
                assert_eq!(session.submit_answer(&correct).unwrap(), AnswerOutcome::Correct);
                session.advance().unwrap();
            }
            assert_eq!(session.summary().unwrap().score, 10);
        }
    }

    mod scoring_tests {
        use super::*;

        #[test]
        fn all_correct_run_on_ds_3850_scores_ten_of_ten() {
            let db = seeded_db();
            let mut session = QuizSession::start(&db, "DS 3850", &unshuffled_config()).unwrap();

            for _ in 0..10 {
                let correct = session
                    .current_question()
                    .unwrap()
                    .correct_text()
                    .unwrap()
                    .to_string();
                assert_eq!(session.submit_answer(&correct).unwrap(), AnswerOutcome::Correct);
                session.advance().unwrap();
            }

            assert_eq!(session.state(), SessionState::Completed);
            let summary = session.summary().unwrap();
            assert_eq!((summary.score, summary.total, summary.scaled), (10, 10, 10.0));
        }

        #[test]
        fn wrong_answers_never_score() {
            let mut session = QuizSession::from_questions(
                "DS 3850",
                vec![make_question(1, "A"), make_question(2, "B")],
            );

            assert_eq!(
                session.submit_answer("definitely wrong").unwrap(),
                AnswerOutcome::Incorrect
            );
            session.advance().unwrap();
            assert_eq!(
                session.submit_answer("bravo 2").unwrap(),
                AnswerOutcome::Correct
            );
            session.advance().unwrap();

            let summary = session.summary().unwrap();
            assert_eq!((summary.score, summary.total), (1, 2));
            assert_eq!(summary.scaled, 5.0);
        }

        #[test]
        fn comparison_ignores_case_and_whitespace() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "C")]);
            assert_eq!(
                session.submit_answer("  CHARLIE 1  ").unwrap(),
                AnswerOutcome::Correct
            );
        }

        #[test]
        fn letter_tag_is_accepted_as_a_choice() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "D")]);
            assert_eq!(session.submit_answer("d").unwrap(), AnswerOutcome::Correct);
        }

        #[test]
        fn empty_choice_is_no_selection_and_changes_nothing() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "A")]);

            assert!(matches!(
                session.submit_answer(""),
                Err(QuizError::NoSelection)
            ));
            assert!(matches!(
                session.submit_answer("   "),
                Err(QuizError::NoSelection)
            ));
            assert_eq!(session.score(), 0);
            assert_eq!(session.state(), SessionState::InProgress);
            assert!(!session.awaiting_advance());

            // still answerable afterwards
            assert_eq!(
                session.submit_answer("alpha 1").unwrap(),
                AnswerOutcome::Correct
            );
        }

        #[test]
        fn repeat_submission_does_not_double_count() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "A")]);

            assert_eq!(
                session.submit_answer("alpha 1").unwrap(),
                AnswerOutcome::Correct
            );
            assert_eq!(session.score(), 1);

            // second call returns the recorded outcome, score unchanged,
            // even with a different (wrong) choice
            assert_eq!(
                session.submit_answer("delta 1").unwrap(),
                AnswerOutcome::Correct
            );
            assert_eq!(session.score(), 1);
        }
    }

    mod transition_tests {
        use super::*;

        #[test]
        fn advance_requires_a_scored_submission() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "A")]);
            assert!(matches!(session.advance(), Err(QuizError::NoSelection)));
        }

        #[test]
        fn advancing_past_the_last_question_completes() {
            let mut session = QuizSession::from_questions(
                "DS 3850",
                vec![make_question(1, "A"), make_question(2, "A")],
            );

            session.submit_answer("alpha 1").unwrap();
            assert_eq!(session.advance().unwrap(), SessionState::InProgress);
            session.submit_answer("alpha 2").unwrap();
            assert_eq!(session.advance().unwrap(), SessionState::Completed);
        }

        #[test]
        fn summary_is_rejected_before_completion() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "A")]);
            assert!(matches!(
                session.summary(),
                Err(QuizError::InvalidState("InProgress"))
            ));
            session.submit_answer("alpha 1").unwrap();
            session.advance().unwrap();
            assert!(session.summary().is_ok());
        }

        #[test]
        fn completed_session_rejects_further_play() {
            let mut session =
                QuizSession::from_questions("DS 3850", vec![make_question(1, "A")]);
            session.submit_answer("alpha 1").unwrap();
            session.advance().unwrap();

            assert!(matches!(
                session.submit_answer("alpha 1"),
                Err(QuizError::InvalidState("Completed"))
            ));
            assert!(matches!(
                session.advance(),
                Err(QuizError::InvalidState("Completed"))
            ));
            assert!(matches!(
                session.current_question(),
                Err(QuizError::InvalidState("Completed"))
            ));
        }

        #[test]
        fn score_stays_within_bounds() {
            let mut session = QuizSession::from_questions(
                "DS 3850",
                (1..=5).map(|i| make_question(i, "B")).collect(),
            );
            while session.state() == SessionState::InProgress {
                let _ = session.submit_answer("bravo guess").unwrap();
                session.advance().unwrap();
            }
            let summary = session.summary().unwrap();
            assert!(summary.score <= summary.total);
        }
    }

    mod integrity_tests {
        use super::*;

        #[test]
        fn unresolvable_indicator_aborts_the_attempt() {
            let mut session = QuizSession::from_questions(
                "DS 3850",
                vec![make_question(1, "A"), make_question(2, "E")],
            );

            session.submit_answer("alpha 1").unwrap();
            session.advance().unwrap();

            let err = session.submit_answer("anything").unwrap_err();
            match err {
                QuizError::DataIntegrity {
                    question_id,
                    indicator,
                } => {
                    assert_eq!(question_id, 2);
                    assert_eq!(indicator, "E");
                }
                other => panic!("expected DataIntegrity, got {:?}", other),
            }
            assert_eq!(session.state(), SessionState::Aborted);

            // terminal: no summary, no further play
            assert!(matches!(
                session.summary(),
                Err(QuizError::InvalidState("Aborted"))
            ));
            assert!(matches!(
                session.submit_answer("x"),
                Err(QuizError::InvalidState("Aborted"))
            ));
        }

        #[test]
        fn legacy_text_indicator_still_scores() {
            let mut session = QuizSession::from_questions(
                "DS 3850",
                vec![make_question(1, "charlie 1")],
            );
            assert_eq!(
                session.submit_answer("Charlie 1").unwrap(),
                AnswerOutcome::Correct
            );
            session.advance().unwrap();
            assert_eq!(session.summary().unwrap().score, 1);
        }
    }
}
