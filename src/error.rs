use thiserror::Error;

/// Failure taxonomy for the question store and the quiz session.
///
/// Every variant carries enough context to show the user a message and a
/// recovery path; nothing here is meant to be swallowed.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The backing database file is missing or unreadable. Fatal to the
    /// current operation; recover by re-opening (usually `quizbowl init`).
    #[error("question store unavailable at '{path}': {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// Admin input was missing or malformed. Recoverable: fix and retry.
    #[error("invalid {field}: must not be empty")]
    Validation { field: &'static str },

    /// A course with this exact name already exists.
    #[error("course '{0}' already exists")]
    AlreadyExists(String),

    /// Course name failed the identifier check and was never interpolated
    /// into SQL.
    #[error("invalid course name '{0}': only letters, digits, spaces and underscores are allowed")]
    InvalidCourseName(String),

    /// The named course table does not exist.
    #[error("no such course '{0}'")]
    UnknownCourse(String),

    /// The course has no questions; a session cannot start.
    #[error("course '{0}' has no questions")]
    NoQuestions(String),

    /// No answer was chosen for the current question. Re-prompt.
    #[error("no answer selected")]
    NoSelection,

    /// A stored correct-answer indicator could not be resolved to one of the
    /// four options. The running attempt is aborted rather than mis-scored.
    #[error("question {question_id}: correct-answer indicator '{indicator}' matches none of the options")]
    DataIntegrity { question_id: i64, indicator: String },

    /// The admin secret was missing or wrong.
    #[error("admin secret missing or incorrect")]
    Unauthorized,

    /// The session was asked for something its current state does not allow,
    /// e.g. `summary()` before completion.
    #[error("operation not valid in session state {0}")]
    InvalidState(&'static str),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;

impl QuizError {
    /// Short hint appended to user-facing error output.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            QuizError::StoreUnavailable { .. } => "run `quizbowl init --seed` to create the question bank",
            QuizError::Validation { .. } => "fill in every field and retry",
            QuizError::AlreadyExists(_) => "pick a different course name",
            QuizError::InvalidCourseName(_) => "use letters, digits, spaces or underscores",
            QuizError::UnknownCourse(_) => "run `quizbowl courses` to see what exists",
            QuizError::NoQuestions(_) => "add questions first or pick another course",
            QuizError::NoSelection => "select an answer first",
            QuizError::DataIntegrity { .. } => "fix the question with `quizbowl question update`",
            QuizError::Unauthorized => "pass --secret or set QUIZBOWL_ADMIN",
            QuizError::InvalidState(_) => "return to the course menu",
            QuizError::Sqlite(_) => "check the database file and retry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = QuizError::AlreadyExists("DS 3850".into());
        assert!(e.to_string().contains("DS 3850"));

        let e = QuizError::DataIntegrity {
            question_id: 7,
            indicator: "E".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("'E'"));
    }

    #[test]
    fn every_variant_has_a_recovery_hint() {
        let variants = [
            QuizError::StoreUnavailable {
                path: "x".into(),
                reason: "y".into(),
            },
            QuizError::Validation { field: "question" },
            QuizError::AlreadyExists("c".into()),
            QuizError::InvalidCourseName("c;".into()),
            QuizError::NoQuestions("c".into()),
            QuizError::NoSelection,
            QuizError::DataIntegrity {
                question_id: 1,
                indicator: "?".into(),
            },
            QuizError::Unauthorized,
            QuizError::InvalidState("Completed"),
        ];
        for v in variants {
            assert!(!v.recovery_hint().is_empty());
        }
    }
}
