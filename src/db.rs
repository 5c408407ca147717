use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::{QuizError, Result};
use crate::models::{Attempt, NewQuestion, Question};

// Internal tables that must never show up as courses.
const RESERVED_TABLES: &[&str] = &["quiz_attempts"];

const QUESTION_COLUMNS: &str =
    "id, question, option_a, option_b, option_c, option_d, correct_answer";

/// Course names become table names, so they are validated before any
/// identifier interpolation: alphanumerics, spaces and underscores only,
/// non-empty, and never the `sqlite_` namespace or a reserved table.
pub fn validate_course_name(name: &str) -> Result<()> {
    let ok = !name.trim().is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_');
    if !ok
        || name.to_lowercase().starts_with("sqlite_")
        || RESERVED_TABLES.contains(&name.to_lowercase().as_str())
    {
        return Err(QuizError::InvalidCourseName(name.to_string()));
    }
    Ok(())
}

// Safe only after validate_course_name: the charset excludes quote characters.
fn quoted(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Result of a question fetch. A shortfall against the requested sample size
/// is a warning the caller passes on, not an error.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub questions: Vec<Question>,
    pub requested: Option<usize>,
}

impl FetchResult {
    pub fn is_partial(&self) -> bool {
        self.requested
            .is_some_and(|n| self.questions.len() < n)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub courses: i64,
    pub questions: i64,
    pub attempts: i64,
    pub avg_scaled: f64,
}

#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| QuizError::StoreUnavailable {
            path: path.as_ref().display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// Opens without creating. Student-path commands use this so a missing
    /// database surfaces as `StoreUnavailable` instead of an empty file.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        if p.to_str() != Some(":memory:") && !p.exists() {
            return Err(QuizError::StoreUnavailable {
                path: p.display().to_string(),
                reason: "file does not exist".to_string(),
            });
        }
        Self::open(p)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let db = Self::open(":memory:")?;
        db.init()?;
        Ok(db)
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS quiz_attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                course TEXT NOT NULL,
                score INTEGER NOT NULL,
                total INTEGER NOT NULL,
                taken_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_attempts_course ON quiz_attempts(course);
            "#,
        )?;
        log::debug!("question store initialized");
        Ok(())
    }

    // Course operations

    pub fn list_courses(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let names = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(names
            .into_iter()
            .filter(|n| {
                !n.to_lowercase().starts_with("sqlite_")
                    && !RESERVED_TABLES.contains(&n.to_lowercase().as_str())
            })
            .collect())
    }

    pub fn course_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn ensure_course(&self, name: &str) -> Result<()> {
        validate_course_name(name)?;
        if !self.course_exists(name)? {
            return Err(QuizError::UnknownCourse(name.to_string()));
        }
        Ok(())
    }

    pub fn create_course(&self, name: &str) -> Result<()> {
        validate_course_name(name)?;
        if self.course_exists(name)? {
            return Err(QuizError::AlreadyExists(name.to_string()));
        }

        let sql = format!(
            r#"
            CREATE TABLE {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                option_a TEXT NOT NULL,
                option_b TEXT NOT NULL,
                option_c TEXT NOT NULL,
                option_d TEXT NOT NULL,
                correct_answer TEXT NOT NULL
            )
            "#,
            quoted(name)
        );
        self.conn.execute(&sql, [])?;
        log::info!("created course '{}'", name);
        Ok(())
    }

    // Question operations

    pub fn insert_question(&self, course: &str, fields: &NewQuestion) -> Result<i64> {
        fields.validate()?;
        self.ensure_course(course)?;

        let sql = format!(
            "INSERT INTO {} (question, option_a, option_b, option_c, option_d, correct_answer) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            quoted(course)
        );
        self.conn.execute(
            &sql,
            params![
                fields.question,
                fields.option_a,
                fields.option_b,
                fields.option_c,
                fields.option_d,
                fields.correct.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_question(&self, course: &str, id: i64, fields: &NewQuestion) -> Result<bool> {
        fields.validate()?;
        self.ensure_course(course)?;

        let sql = format!(
            "UPDATE {} SET question = ?1, option_a = ?2, option_b = ?3, option_c = ?4, \
             option_d = ?5, correct_answer = ?6 WHERE id = ?7",
            quoted(course)
        );
        let rows = self.conn.execute(
            &sql,
            params![
                fields.question,
                fields.option_a,
                fields.option_b,
                fields.option_c,
                fields.option_d,
                fields.correct.as_str(),
                id,
            ],
        )?;
        Ok(rows > 0)
    }

    pub fn delete_question(&self, course: &str, id: i64) -> Result<bool> {
        self.ensure_course(course)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", quoted(course));
        let rows = self.conn.execute(&sql, params![id])?;
        Ok(rows > 0)
    }

    /// Full dump ordered by id, for the admin editor. No sampling.
    pub fn list_all_questions(&self, course: &str) -> Result<Vec<Question>> {
        self.ensure_course(course)?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            QUESTION_COLUMNS,
            quoted(course)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], question_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Returns up to `limit` questions; with `random_sample` the subset is
    /// drawn uniformly without replacement (`ORDER BY RANDOM()`). A short
    /// course is reported through `FetchResult::is_partial`, not an error.
    pub fn fetch_questions(
        &self,
        course: &str,
        limit: Option<usize>,
        random_sample: bool,
    ) -> Result<FetchResult> {
        self.ensure_course(course)?;

        let order = if random_sample { "RANDOM()" } else { "id" };
        let sql = match limit {
            Some(_) => format!(
                "SELECT {} FROM {} ORDER BY {} LIMIT ?1",
                QUESTION_COLUMNS,
                quoted(course),
                order
            ),
            None => format!(
                "SELECT {} FROM {} ORDER BY {}",
                QUESTION_COLUMNS,
                quoted(course),
                order
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let questions = match limit {
            Some(n) => {
                let rows = stmt.query_map(params![n as i64], question_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let rows = stmt.query_map([], question_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(FetchResult {
            questions,
            requested: limit,
        })
    }

    pub fn count_questions(&self, course: &str) -> Result<i64> {
        self.ensure_course(course)?;
        let sql = format!("SELECT COUNT(*) FROM {}", quoted(course));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    // Attempt history

    pub fn record_attempt(&self, course: &str, score: u32, total: u32) -> Result<i64> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO quiz_attempts (course, score, total, taken_at) VALUES (?1, ?2, ?3, ?4)",
            params![course, score, total, now.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_attempts(&self, limit: Option<usize>) -> Result<Vec<Attempt>> {
        let sql = match limit {
            Some(_) => {
                "SELECT id, course, score, total, taken_at FROM quiz_attempts \
                 ORDER BY taken_at DESC, id DESC LIMIT ?1"
            }
            None => {
                "SELECT id, course, score, total, taken_at FROM quiz_attempts \
                 ORDER BY taken_at DESC, id DESC"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;

        let map = |row: &rusqlite::Row| -> rusqlite::Result<Attempt> {
            Ok(Attempt {
                id: row.get(0)?,
                course: row.get(1)?,
                score: row.get(2)?,
                total: row.get(3)?,
                taken_at: row.get(4)?,
            })
        };

        let attempts = match limit {
            Some(n) => stmt
                .query_map(params![n as i64], map)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], map)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(attempts)
    }

    pub fn get_stats(&self) -> Result<Stats> {
        let courses = self.list_courses()?;
        let mut questions = 0i64;
        for course in &courses {
            questions += self.count_questions(course)?;
        }

        let attempts: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM quiz_attempts", [], |row| row.get(0))?;

        let avg_scaled: f64 = self.conn.query_row(
            "SELECT COALESCE(AVG(score * 10.0 / total), 0) FROM quiz_attempts WHERE total > 0",
            [],
            |row| row.get(0),
        )?;

        Ok(Stats {
            courses: courses.len() as i64,
            questions,
            attempts,
            avg_scaled,
        })
    }
}

fn question_from_row(row: &rusqlite::Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        option_a: row.get(2)?,
        option_b: row.get(3)?,
        option_c: row.get(4)?,
        option_d: row.get(5)?,
        correct_answer: row.get(6)?,
    })
}
