mod config;
mod db;
mod error;
mod models;
mod seed;
mod session;
mod tui;

use clap::{Parser, Subcommand};

use config::Config;
use db::Database;
use error::{QuizError, Result};
use models::{AnswerKey, JsonOutput, NewQuestion};

#[derive(Parser)]
#[command(name = "quizbowl")]
#[command(about = "A course quiz bowl with a local question bank and terminal player")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the question bank
    Init {
        /// Also create the four stock courses with their questions
        #[arg(long)]
        seed: bool,
    },

    /// List available courses
    Courses,

    /// Manage courses (admin)
    #[command(subcommand)]
    Course(CourseCommands),

    /// Manage questions (admin)
    #[command(subcommand)]
    Question(QuestionCommands),

    /// Take a quiz in the terminal player
    Play {
        /// Jump straight into this course
        #[arg(long, short)]
        course: Option<String>,
    },

    /// Show question-bank statistics
    Stats,

    /// List recorded attempts, newest first
    History {
        /// Maximum rows to show
        #[arg(long, short, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CourseCommands {
    /// Create a new, empty course
    Add {
        /// Course name (letters, digits, spaces, underscores)
        name: String,

        /// Admin secret
        #[arg(long)]
        secret: Option<String>,
    },
}

#[derive(Subcommand)]
enum QuestionCommands {
    /// Dump a course's questions in id order
    List {
        /// Course name
        course: String,
    },

    /// Add a question to a course
    Add {
        /// Course name
        course: String,

        #[command(flatten)]
        fields: QuestionFields,

        /// Admin secret
        #[arg(long)]
        secret: Option<String>,
    },

    /// Replace a question's fields
    Update {
        /// Course name
        course: String,

        /// Question id
        id: i64,

        #[command(flatten)]
        fields: QuestionFields,

        /// Admin secret
        #[arg(long)]
        secret: Option<String>,
    },

    /// Delete a question
    Delete {
        /// Course name
        course: String,

        /// Question id
        id: i64,

        /// Admin secret
        #[arg(long)]
        secret: Option<String>,
    },
}

#[derive(clap::Args)]
struct QuestionFields {
    /// Question text
    #[arg(long)]
    question: String,

    /// Option A
    #[arg(long = "option-a")]
    option_a: String,

    /// Option B
    #[arg(long = "option-b")]
    option_b: String,

    /// Option C
    #[arg(long = "option-c")]
    option_c: String,

    /// Option D
    #[arg(long = "option-d")]
    option_d: String,

    /// Correct option letter (A-D)
    #[arg(long)]
    correct: String,
}

impl QuestionFields {
    fn into_payload(self) -> Result<NewQuestion> {
        let correct = AnswerKey::from_str(&self.correct)
            .ok_or(QuizError::Validation { field: "correct" })?;
        let payload = NewQuestion {
            question: self.question,
            option_a: self.option_a,
            option_b: self.option_b,
            option_c: self.option_c,
            option_d: self.option_d,
            correct,
        };
        payload.validate()?;
        Ok(payload)
    }
}

/// Admin gate: the provided secret (flag, else `QUIZBOWL_ADMIN`) must match
/// the configured one. No configured secret means the admin path is closed.
fn require_admin(expected: Option<&str>, provided: Option<&str>) -> Result<()> {
    match (expected, provided) {
        (Some(e), Some(p)) if e == p => Ok(()),
        _ => Err(QuizError::Unauthorized),
    }
}

fn provided_secret(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var("QUIZBOWL_ADMIN").ok())
        .filter(|s| !s.is_empty())
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(qe) = e.downcast_ref::<QuizError>() {
            eprintln!("  ({})", qe.recovery_hint());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let db_path = config::get_db_path();
    let config = Config::load();

    match cli.command {
        Commands::Init { seed } => {
            let db = Database::open(&db_path)?;
            db.init()?;
            let seeded = if seed { seed::seed_stock_courses(&db)? } else { 0 };

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "path": db_path.display().to_string(),
                        "seeded_courses": seeded
                    })))?
                );
            } else {
                println!("Question bank initialized at: {}", db_path.display());
                if seed {
                    println!("Seeded {} stock course(s).", seeded);
                }
            }
        }

        Commands::Courses => {
            let db = Database::open_existing(&db_path)?;
            let courses = db.list_courses()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&courses))?);
            } else if courses.is_empty() {
                println!("No courses found. Run `quizbowl init --seed` to get started.");
            } else {
                println!("{:<30} QUESTIONS", "COURSE");
                println!("{}", "-".repeat(42));
                for course in courses {
                    let count = db.count_questions(&course)?;
                    println!("{:<30} {}", course, count);
                }
            }
        }

        Commands::Course(course_cmd) => match course_cmd {
            CourseCommands::Add { name, secret } => {
                require_admin(
                    config.admin_secret.as_deref(),
                    provided_secret(secret).as_deref(),
                )?;
                let db = Database::open_existing(&db_path)?;
                db.create_course(&name)?;

                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&name))?);
                } else {
                    println!("Created course '{}'.", name);
                }
            }
        },

        Commands::Question(question_cmd) => match question_cmd {
            QuestionCommands::List { course } => {
                let db = Database::open_existing(&db_path)?;
                let questions = db.list_all_questions(&course)?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&questions))?);
                } else if questions.is_empty() {
                    println!("Course '{}' has no questions yet.", course);
                } else {
                    println!("{:<5} {:<50} ANSWER", "ID", "QUESTION");
                    println!("{}", "-".repeat(64));
                    for q in questions {
                        println!(
                            "{:<5} {:<50} {}",
                            q.id,
                            truncate(&q.question, 48),
                            q.correct_answer
                        );
                    }
                }
            }

            QuestionCommands::Add {
                course,
                fields,
                secret,
            } => {
                require_admin(
                    config.admin_secret.as_deref(),
                    provided_secret(secret).as_deref(),
                )?;
                let db = Database::open_existing(&db_path)?;
                let payload = fields.into_payload()?;
                let id = db.insert_question(&course, &payload)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "course": course,
                            "id": id
                        })))?
                    );
                } else {
                    println!("Added question {} to '{}'.", id, course);
                }
            }

            QuestionCommands::Update {
                course,
                id,
                fields,
                secret,
            } => {
                require_admin(
                    config.admin_secret.as_deref(),
                    provided_secret(secret).as_deref(),
                )?;
                let db = Database::open_existing(&db_path)?;
                let payload = fields.into_payload()?;
                let found = db.update_question(&course, id, &payload)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "updated": found
                        })))?
                    );
                } else if found {
                    println!("Updated question {} in '{}'.", id, course);
                } else {
                    println!("No question {} in '{}'.", id, course);
                }
            }

            QuestionCommands::Delete { course, id, secret } => {
                require_admin(
                    config.admin_secret.as_deref(),
                    provided_secret(secret).as_deref(),
                )?;
                let db = Database::open_existing(&db_path)?;
                let found = db.delete_question(&course, id)?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "deleted": found
                        })))?
                    );
                } else if found {
                    println!("Deleted question {} from '{}'.", id, course);
                } else {
                    println!("No question {} in '{}'.", id, course);
                }
            }
        },

        Commands::Play { course } => {
            let db = Database::open_existing(&db_path)?;
            tui::run(db, config, course)?;
        }

        Commands::Stats => {
            let db = Database::open_existing(&db_path)?;
            let stats = db.get_stats()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&stats))?);
            } else {
                println!("=== Question Bank ===");
                println!("Courses: {}", stats.courses);
                println!("Questions: {}", stats.questions);
                println!("Attempts taken: {}", stats.attempts);
                println!("Average score: {:.1}/10", stats.avg_scaled);
            }
        }

        Commands::History { limit } => {
            let db = Database::open_existing(&db_path)?;
            let attempts = db.list_attempts(Some(limit))?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&attempts))?);
            } else if attempts.is_empty() {
                println!("No attempts recorded yet.");
            } else {
                println!("{:<22} {:<20} SCORE", "TAKEN", "COURSE");
                println!("{}", "-".repeat(52));
                for a in attempts {
                    println!(
                        "{:<22} {:<20} {}/{}",
                        truncate(&a.taken_at, 20),
                        truncate(&a.course, 18),
                        a.score,
                        a.total
                    );
                }
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
