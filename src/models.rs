use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

// Letter tag identifying the correct option. This is the canonical stored
// encoding; legacy rows holding the full option text are resolved on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(AnswerKey::A),
            "B" => Some(AnswerKey::B),
            "C" => Some(AnswerKey::C),
            "D" => Some(AnswerKey::D),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AnswerKey::A => 0,
            AnswerKey::B => 1,
            AnswerKey::C => 2,
            AnswerKey::D => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(AnswerKey::A),
            1 => Some(AnswerKey::B),
            2 => Some(AnswerKey::C),
            3 => Some(AnswerKey::D),
            _ => None,
        }
    }

    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];
}

// Case- and whitespace-insensitive comparison form for answers.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// One row of a course table.
///
/// `correct_answer` holds the raw stored indicator: a letter tag in current
/// data, possibly the full option text in rows written by older revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
}

impl Question {
    pub fn options(&self) -> [&str; 4] {
        [
            &self.option_a,
            &self.option_b,
            &self.option_c,
            &self.option_d,
        ]
    }

    /// Resolves the stored indicator to the index of the correct option.
    ///
    /// Letter tags map directly; a non-letter indicator matches by option
    /// text. Returns `None` when the indicator matches nothing, which the
    /// session treats as a data-integrity failure.
    pub fn correct_index(&self) -> Option<usize> {
        if let Some(key) = AnswerKey::from_str(&self.correct_answer) {
            return Some(key.index());
        }
        let wanted = normalize(&self.correct_answer);
        if wanted.is_empty() {
            return None;
        }
        self.options().iter().position(|o| normalize(o) == wanted)
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.correct_index().map(|i| self.options()[i])
    }

    /// Reorders the four options and rewrites the letter indicator to follow.
    /// An unresolvable indicator is left as-is; scoring will fail closed on it.
    pub fn apply_option_order(&mut self, order: [usize; 4]) {
        let correct = self.correct_index();
        let old = [
            std::mem::take(&mut self.option_a),
            std::mem::take(&mut self.option_b),
            std::mem::take(&mut self.option_c),
            std::mem::take(&mut self.option_d),
        ];
        self.option_a = old[order[0]].clone();
        self.option_b = old[order[1]].clone();
        self.option_c = old[order[2]].clone();
        self.option_d = old[order[3]].clone();

        if let Some(old_index) = correct {
            if let Some(new_pos) = order.iter().position(|&i| i == old_index) {
                if let Some(key) = AnswerKey::from_index(new_pos) {
                    self.correct_answer = key.as_str().to_string();
                }
            }
        }
    }
}

/// Admin payload for inserting or updating a question. Every field must be
/// present; validation runs before any statement touches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct: AnswerKey,
}

impl NewQuestion {
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, &str); 5] = [
            ("question", &self.question),
            ("option_a", &self.option_a),
            ("option_b", &self.option_b),
            ("option_c", &self.option_c),
            ("option_d", &self.option_d),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(QuizError::Validation { field: name });
            }
        }
        Ok(())
    }
}

/// Final result of a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizSummary {
    pub score: u32,
    pub total: u32,
    pub scaled: f64,
}

impl QuizSummary {
    pub fn new(score: u32, total: u32) -> Self {
        let scaled = if total == 0 {
            0.0
        } else {
            // score out of 10, one decimal place
            (score as f64 / total as f64 * 100.0).round() / 10.0
        };
        Self {
            score,
            total,
            scaled,
        }
    }
}

/// A recorded completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub course: String,
    pub score: i64,
    pub total: i64,
    pub taken_at: String,
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: 1,
            question: "What does SQL stand for?".to_string(),
            option_a: "Structured Query Language".to_string(),
            option_b: "Strong Question Language".to_string(),
            option_c: "Standard Query Language".to_string(),
            option_d: "Sequential Query Language".to_string(),
            correct_answer: "A".to_string(),
        }
    }

    mod answer_key_tests {
        use super::*;

        #[test]
        fn from_str_accepts_letters_case_insensitively() {
            assert_eq!(AnswerKey::from_str("a"), Some(AnswerKey::A));
            assert_eq!(AnswerKey::from_str("B"), Some(AnswerKey::B));
            assert_eq!(AnswerKey::from_str(" c "), Some(AnswerKey::C));
            assert_eq!(AnswerKey::from_str("d"), Some(AnswerKey::D));
        }

        #[test]
        fn from_str_rejects_everything_else() {
            assert_eq!(AnswerKey::from_str("E"), None);
            assert_eq!(AnswerKey::from_str(""), None);
            assert_eq!(AnswerKey::from_str("AB"), None);
            assert_eq!(AnswerKey::from_str("Structured Query Language"), None);
        }

        #[test]
        fn index_round_trips() {
            for key in AnswerKey::ALL {
                assert_eq!(AnswerKey::from_index(key.index()), Some(key));
            }
            assert_eq!(AnswerKey::from_index(4), None);
        }
    }

    mod question_tests {
        use super::*;

        #[test]
        fn letter_indicator_resolves() {
            let q = sample_question();
            assert_eq!(q.correct_index(), Some(0));
            assert_eq!(q.correct_text(), Some("Structured Query Language"));
        }

        #[test]
        fn lowercase_letter_with_whitespace_resolves() {
            let mut q = sample_question();
            q.correct_answer = " b ".to_string();
            assert_eq!(q.correct_text(), Some("Strong Question Language"));
        }

        #[test]
        fn legacy_full_text_indicator_resolves() {
            let mut q = sample_question();
            q.correct_answer = "standard query language".to_string();
            assert_eq!(q.correct_index(), Some(2));
        }

        #[test]
        fn unresolvable_indicator_yields_none() {
            let mut q = sample_question();
            q.correct_answer = "E".to_string();
            assert_eq!(q.correct_index(), None);

            q.correct_answer = "  ".to_string();
            assert_eq!(q.correct_index(), None);
        }

        #[test]
        fn option_reorder_keeps_the_correct_text() {
            let mut q = sample_question();
            let before = q.correct_text().unwrap().to_string();
            q.apply_option_order([3, 2, 1, 0]);
            assert_eq!(q.correct_answer, "D");
            assert_eq!(q.correct_text(), Some(before.as_str()));
            assert_eq!(q.option_a, "Sequential Query Language");
        }

        #[test]
        fn option_reorder_with_identity_is_a_noop() {
            let mut q = sample_question();
            q.apply_option_order([0, 1, 2, 3]);
            assert_eq!(q.correct_answer, "A");
            assert_eq!(q.option_a, "Structured Query Language");
        }
    }

    mod new_question_tests {
        use super::*;

        fn payload() -> NewQuestion {
            NewQuestion {
                question: "q".to_string(),
                option_a: "a".to_string(),
                option_b: "b".to_string(),
                option_c: "c".to_string(),
                option_d: "d".to_string(),
                correct: AnswerKey::B,
            }
        }

        #[test]
        fn complete_payload_validates() {
            assert!(payload().validate().is_ok());
        }

        #[test]
        fn empty_option_b_fails_with_field_name() {
            let mut p = payload();
            p.option_b = "   ".to_string();
            match p.validate() {
                Err(QuizError::Validation { field }) => assert_eq!(field, "option_b"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        #[test]
        fn empty_question_fails() {
            let mut p = payload();
            p.question = String::new();
            assert!(matches!(
                p.validate(),
                Err(QuizError::Validation { field: "question" })
            ));
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn perfect_score_scales_to_ten() {
            let s = QuizSummary::new(10, 10);
            assert_eq!(s.scaled, 10.0);
        }

        #[test]
        fn scaled_score_rounds_to_one_decimal() {
            // 7/9 * 10 = 7.777... -> 7.8
            let s = QuizSummary::new(7, 9);
            assert_eq!(s.scaled, 7.8);

            // 1/3 * 10 = 3.333... -> 3.3
            let s = QuizSummary::new(1, 3);
            assert_eq!(s.scaled, 3.3);
        }

        #[test]
        fn zero_total_scales_to_zero() {
            let s = QuizSummary::new(0, 0);
            assert_eq!(s.scaled, 0.0);
        }
    }

    mod json_output_tests {
        use super::*;

        #[test]
        fn serializes_ok_and_err() {
            let ok = JsonOutput::ok(3);
            let json = serde_json::to_string(&ok).unwrap();
            assert!(json.contains("\"success\":true"));
            assert!(json.contains("\"data\":3"));

            let err = JsonOutput::<()>::err("nope");
            let json = serde_json::to_string(&err).unwrap();
            assert!(json.contains("\"success\":false"));
            assert!(json.contains("\"error\":\"nope\""));
        }
    }
}
